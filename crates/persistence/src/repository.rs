// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage seam between the register and its backends.

use kitloan_audit::AuditEvent;
use kitloan_domain::{Booking, BookingId, BookingStatus, Kit, KitId};
use serde::Serialize;

use crate::error::PersistenceError;

/// Which backend served a repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreSource {
    /// The primary `SQLite` database.
    Database,
    /// The JSON files on local disk.
    LocalCache,
}

impl StoreSource {
    /// Returns the string representation used in logs and output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::LocalCache => "local_cache",
        }
    }
}

impl std::fmt::Display for StoreSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A repository result tagged with the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stored<T> {
    pub value: T,
    pub source: StoreSource,
}

impl<T> Stored<T> {
    /// Creates a new `Stored` value.
    #[must_use]
    pub const fn new(value: T, source: StoreSource) -> Self {
        Self { value, source }
    }

    /// Transforms the value, keeping the source.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Stored<U>
    where
        F: FnOnce(T) -> U,
    {
        Stored {
            value: f(self.value),
            source: self.source,
        }
    }

    /// Discards the source.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Record-level storage for kits, bookings and the audit trail.
///
/// Implementations must never partially apply a write: a call either
/// persists the whole record or returns an error.
pub trait Repository {
    /// Loads the whole kit catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list_kits(&mut self) -> Result<Stored<Vec<Kit>>, PersistenceError>;

    /// Loads every booking.
    ///
    /// Records that cannot be decoded are skipped rather than failing the
    /// whole load.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list_bookings(&mut self) -> Result<Stored<Vec<Booking>>, PersistenceError>;

    /// Stores a new booking.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if the id is taken, or a backend error.
    fn create_booking(&mut self, booking: &Booking) -> Result<Stored<()>, PersistenceError>;

    /// Updates only the status of an existing booking.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound` if no such booking exists, or a backend error.
    fn set_booking_status(
        &mut self,
        booking_id: &BookingId,
        status: BookingStatus,
    ) -> Result<Stored<()>, PersistenceError>;

    /// Adds a kit to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if the id is taken, or a backend error.
    fn create_kit(&mut self, kit: &Kit) -> Result<Stored<()>, PersistenceError>;

    /// Replaces every field of an existing kit except its id.
    ///
    /// # Errors
    ///
    /// Returns `KitNotFound` if no such kit exists, or a backend error.
    fn update_kit(&mut self, kit: &Kit) -> Result<Stored<()>, PersistenceError>;

    /// Removes a kit from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `KitNotFound` if no such kit exists, or a backend error.
    fn delete_kit(&mut self, kit_id: &KitId) -> Result<Stored<()>, PersistenceError>;

    /// Appends an audit event to the trail.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be stored.
    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<Stored<()>, PersistenceError>;
}

/// A repository that can be overwritten wholesale from another source.
///
/// Used to refresh a local copy after a successful primary read.
pub trait LocalStore: Repository {
    /// Replaces the stored kit catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written.
    fn replace_kits(&mut self, kits: &[Kit]) -> Result<(), PersistenceError>;

    /// Replaces the stored booking list.
    ///
    /// # Errors
    ///
    /// Returns an error if the bookings cannot be written.
    fn replace_bookings(&mut self, bookings: &[Booking]) -> Result<(), PersistenceError>;
}
