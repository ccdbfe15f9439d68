// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the kit loan register.
//!
//! Three `Repository` implementations live here:
//!
//! - **`SqliteRepository`**: the primary store, built on Diesel with
//!   embedded migrations.
//! - **`JsonFileCache`**: a directory of JSON files used when the
//!   database cannot be reached. Kit files written by older tooling are
//!   normalized on read.
//! - **`FallbackRepository`**: composes the two. Every result carries a
//!   `StoreSource` naming the backend that actually served it.
//!
//! ## Testing Philosophy
//!
//! - `SQLite` tests run against isolated in-memory databases
//! - JSON cache tests run inside temporary directories

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use kitloan_audit::AuditEvent;
use kitloan_domain::{Booking, BookingId, BookingStatus, Kit, KitId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod diesel_schema;
mod error;
mod fallback;
mod json_cache;
mod mutations;
mod queries;
mod repository;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use fallback::{DEFAULT_TRIP_AFTER, FallbackRepository};
pub use json_cache::JsonFileCache;
pub use repository::{LocalStore, Repository, StoreSource, Stored};

/// The primary `SQLite` store.
pub struct SqliteRepository {
    conn: SqliteConnection,
}

impl SqliteRepository {
    /// Creates a repository over a fresh in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so instances
    /// never see each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_kitloan_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a repository over a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Counts the recorded audit events.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_audit_events(&mut self) -> Result<i64, PersistenceError> {
        queries::audit::count_audit_events(&mut self.conn)
    }

    /// Returns the action name of every recorded audit event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn audit_action_names(&mut self) -> Result<Vec<String>, PersistenceError> {
        queries::audit::list_audit_action_names(&mut self.conn)
    }

    const fn stored<T>(value: T) -> Stored<T> {
        Stored::new(value, StoreSource::Database)
    }
}

impl Repository for SqliteRepository {
    fn list_kits(&mut self) -> Result<Stored<Vec<Kit>>, PersistenceError> {
        queries::kits::list_kits(&mut self.conn).map(Self::stored)
    }

    fn list_bookings(&mut self) -> Result<Stored<Vec<Booking>>, PersistenceError> {
        queries::bookings::list_bookings(&mut self.conn).map(Self::stored)
    }

    fn create_booking(&mut self, booking: &Booking) -> Result<Stored<()>, PersistenceError> {
        mutations::bookings::insert_booking(&mut self.conn, booking).map(Self::stored)
    }

    fn set_booking_status(
        &mut self,
        booking_id: &BookingId,
        status: BookingStatus,
    ) -> Result<Stored<()>, PersistenceError> {
        mutations::bookings::update_booking_status(&mut self.conn, booking_id, status)
            .map(Self::stored)
    }

    fn create_kit(&mut self, kit: &Kit) -> Result<Stored<()>, PersistenceError> {
        if queries::kits::kit_exists(&mut self.conn, &kit.id)? {
            debug!(kit_id = %kit.id, "Rejecting duplicate kit id");
            return Err(PersistenceError::Duplicate(format!("kit {}", kit.id)));
        }
        mutations::kits::insert_kit(&mut self.conn, kit).map(Self::stored)
    }

    fn update_kit(&mut self, kit: &Kit) -> Result<Stored<()>, PersistenceError> {
        mutations::kits::update_kit(&mut self.conn, kit).map(Self::stored)
    }

    fn delete_kit(&mut self, kit_id: &KitId) -> Result<Stored<()>, PersistenceError> {
        mutations::kits::delete_kit(&mut self.conn, kit_id).map(Self::stored)
    }

    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<Stored<()>, PersistenceError> {
        mutations::audit::insert_audit_event(&mut self.conn, event).map(Self::stored)
    }
}
