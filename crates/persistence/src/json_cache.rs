// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON-file local cache.
//!
//! Layout of the cache directory:
//!
//! - `kits.json`: array of kit records, current or legacy shape
//! - `bookings.json`: array of bookings
//! - `audit.json`: array of audit events, oldest first
//!
//! Missing files read as empty. Every write replaces the whole file via a
//! temporary sibling and a rename.

use kitloan_audit::AuditEvent;
use kitloan_domain::{Booking, BookingId, BookingStatus, Kit, KitId, KitRecord};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::PersistenceError;
use crate::repository::{LocalStore, Repository, StoreSource, Stored};

const KITS_FILE: &str = "kits.json";
const BOOKINGS_FILE: &str = "bookings.json";
const AUDIT_FILE: &str = "audit.json";

/// A `Repository` backed by JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    /// Opens (creating if needed) a cache directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, PersistenceError> {
        let dir: PathBuf = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        info!(dir = %dir.display(), "Opened local JSON cache");
        Ok(Self { dir })
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_array(&self, file: &str) -> Result<Vec<serde_json::Value>, PersistenceError> {
        let path: PathBuf = self.path(file);
        if !path.exists() {
            debug!(file, "Cache file missing, reading as empty");
            return Ok(Vec::new());
        }
        let raw: String = fs::read_to_string(&path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_array<T: Serialize>(
        &self,
        file: &str,
        records: &[T],
    ) -> Result<(), PersistenceError> {
        let path: PathBuf = self.path(file);
        let staging: PathBuf = self.path(&format!("{file}.tmp"));
        let body: String = serde_json::to_string_pretty(records)?;
        fs::write(&staging, body)?;
        fs::rename(&staging, &path)?;
        debug!(file, count = records.len(), "Wrote cache file");
        Ok(())
    }

    fn load_kits(&self) -> Result<Vec<Kit>, PersistenceError> {
        let records: Vec<KitRecord> = self
            .read_array(KITS_FILE)?
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<KitRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable kit record");
                    None
                }
            })
            .collect();

        let needs_ids: bool = records.iter().any(KitRecord::needs_id);
        let kits: Vec<Kit> = records
            .into_iter()
            .map(|record| record.normalize(|| KitId::new(&Uuid::new_v4().to_string())))
            .collect();

        // Persist freshly assigned ids so they stay stable across reads.
        if needs_ids {
            info!(count = kits.len(), "Normalized kit records, rewriting kits file");
            self.write_array(KITS_FILE, &kits)?;
        }

        Ok(kits)
    }

    fn load_bookings(&self) -> Result<Vec<Booking>, PersistenceError> {
        Ok(self
            .read_array(BOOKINGS_FILE)?
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Booking>(value) {
                Ok(booking) => Some(booking),
                Err(e) => {
                    warn!(error = %e, "Skipping undecodable cached booking");
                    None
                }
            })
            .collect())
    }

    const fn stored<T>(value: T) -> Stored<T> {
        Stored::new(value, StoreSource::LocalCache)
    }
}

impl Repository for JsonFileCache {
    fn list_kits(&mut self) -> Result<Stored<Vec<Kit>>, PersistenceError> {
        self.load_kits().map(Self::stored)
    }

    fn list_bookings(&mut self) -> Result<Stored<Vec<Booking>>, PersistenceError> {
        self.load_bookings().map(Self::stored)
    }

    fn create_booking(&mut self, booking: &Booking) -> Result<Stored<()>, PersistenceError> {
        let mut bookings: Vec<Booking> = self.load_bookings()?;
        if bookings.iter().any(|b| b.id == booking.id) {
            return Err(PersistenceError::Duplicate(format!("booking {}", booking.id)));
        }
        bookings.push(booking.clone());
        self.write_array(BOOKINGS_FILE, &bookings)?;
        info!(booking_id = %booking.id, "Created booking in local cache");
        Ok(Self::stored(()))
    }

    fn set_booking_status(
        &mut self,
        booking_id: &BookingId,
        status: BookingStatus,
    ) -> Result<Stored<()>, PersistenceError> {
        let mut bookings: Vec<Booking> = self.load_bookings()?;
        let booking: &mut Booking = bookings
            .iter_mut()
            .find(|b| &b.id == booking_id)
            .ok_or_else(|| PersistenceError::BookingNotFound(booking_id.to_string()))?;
        booking.status = status;
        self.write_array(BOOKINGS_FILE, &bookings)?;
        info!(%booking_id, %status, "Updated booking status in local cache");
        Ok(Self::stored(()))
    }

    fn create_kit(&mut self, kit: &Kit) -> Result<Stored<()>, PersistenceError> {
        let mut kits: Vec<Kit> = self.load_kits()?;
        if kits.iter().any(|k| k.id == kit.id) {
            return Err(PersistenceError::Duplicate(format!("kit {}", kit.id)));
        }
        kits.push(kit.clone());
        self.write_array(KITS_FILE, &kits)?;
        Ok(Self::stored(()))
    }

    fn update_kit(&mut self, kit: &Kit) -> Result<Stored<()>, PersistenceError> {
        let mut kits: Vec<Kit> = self.load_kits()?;
        let slot: &mut Kit = kits
            .iter_mut()
            .find(|k| k.id == kit.id)
            .ok_or_else(|| PersistenceError::KitNotFound(kit.id.to_string()))?;
        *slot = kit.clone();
        self.write_array(KITS_FILE, &kits)?;
        Ok(Self::stored(()))
    }

    fn delete_kit(&mut self, kit_id: &KitId) -> Result<Stored<()>, PersistenceError> {
        let mut kits: Vec<Kit> = self.load_kits()?;
        let before: usize = kits.len();
        kits.retain(|k| &k.id != kit_id);
        if kits.len() == before {
            return Err(PersistenceError::KitNotFound(kit_id.to_string()));
        }
        self.write_array(KITS_FILE, &kits)?;
        Ok(Self::stored(()))
    }

    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<Stored<()>, PersistenceError> {
        let mut events: Vec<serde_json::Value> = self.read_array(AUDIT_FILE)?;
        events.push(serde_json::to_value(event)?);
        self.write_array(AUDIT_FILE, &events)?;
        Ok(Self::stored(()))
    }
}

impl LocalStore for JsonFileCache {
    fn replace_kits(&mut self, kits: &[Kit]) -> Result<(), PersistenceError> {
        self.write_array(KITS_FILE, kits)
    }

    fn replace_bookings(&mut self, bookings: &[Booking]) -> Result<(), PersistenceError> {
        self.write_array(BOOKINGS_FILE, bookings)
    }
}
