// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Primary store with a local fallback.
//!
//! Calls go to the primary first. A store failure (anything other than a
//! missing or duplicate record) is logged and the call is served from the
//! local store instead. Successful primary calls are mirrored into the
//! local store so it stays usable offline.
//!
//! After `trip_after` consecutive primary failures the primary is skipped
//! entirely until `reset()` is called.
//!
//! A non-empty primary read replaces the local copy of that list wholesale.
//! Records written only to the local store while the primary was down are
//! dropped at that point; nothing replays them into the primary. Callers
//! that cannot lose offline writes must copy them over before the first
//! read after the primary recovers.

use kitloan_audit::AuditEvent;
use kitloan_domain::{Booking, BookingId, BookingStatus, Kit, KitId};
use tracing::{debug, info, warn};

use crate::error::PersistenceError;
use crate::repository::{LocalStore, Repository, Stored};

/// Consecutive primary failures tolerated before the primary is skipped.
pub const DEFAULT_TRIP_AFTER: u32 = 3;

/// A `Repository` that prefers `P` and falls back to `L`.
#[derive(Debug)]
pub struct FallbackRepository<P, L> {
    primary: P,
    local: L,
    trip_after: u32,
    consecutive_failures: u32,
}

impl<P, L> FallbackRepository<P, L>
where
    P: Repository,
    L: LocalStore,
{
    /// Composes a primary and a local store.
    #[must_use]
    pub const fn new(primary: P, local: L) -> Self {
        Self {
            primary,
            local,
            trip_after: DEFAULT_TRIP_AFTER,
            consecutive_failures: 0,
        }
    }

    /// Sets how many consecutive primary failures trip the fallback.
    ///
    /// Values below one are treated as one.
    #[must_use]
    pub const fn with_trip_after(mut self, trip_after: u32) -> Self {
        self.trip_after = if trip_after == 0 { 1 } else { trip_after };
        self
    }

    /// Returns true while the primary is being skipped.
    #[must_use]
    pub const fn is_tripped(&self) -> bool {
        self.consecutive_failures >= self.trip_after
    }

    /// Returns the number of primary failures since the last success.
    #[must_use]
    pub const fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Gives the primary another chance on the next call.
    pub fn reset(&mut self) {
        if self.consecutive_failures > 0 {
            info!(
                failures = self.consecutive_failures,
                "Resetting primary store failure count"
            );
        }
        self.consecutive_failures = 0;
    }

    /// Returns the local store.
    #[must_use]
    pub const fn local(&self) -> &L {
        &self.local
    }

    /// Returns the primary store.
    pub const fn primary_mut(&mut self) -> &mut P {
        &mut self.primary
    }

    fn record_failure(&mut self, operation: &str, err: &PersistenceError) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        warn!(
            operation,
            error = %err,
            failures = self.consecutive_failures,
            "Primary store failed, serving from local cache"
        );
        if self.consecutive_failures == self.trip_after {
            warn!(
                trip_after = self.trip_after,
                "Primary store tripped, skipping it until reset"
            );
        }
    }

    fn read<T, F, R, G>(
        &mut self,
        operation: &str,
        on_primary: F,
        refresh: R,
        on_local: G,
    ) -> Result<Stored<Vec<T>>, PersistenceError>
    where
        F: FnOnce(&mut P) -> Result<Stored<Vec<T>>, PersistenceError>,
        R: FnOnce(&mut L, &[T]) -> Result<(), PersistenceError>,
        G: FnOnce(&mut L) -> Result<Stored<Vec<T>>, PersistenceError>,
    {
        if !self.is_tripped() {
            match on_primary(&mut self.primary) {
                Ok(stored) => {
                    self.consecutive_failures = 0;
                    let refreshed: Result<(), PersistenceError> = if stored.value.is_empty() {
                        Ok(())
                    } else {
                        refresh(&mut self.local, &stored.value)
                    };
                    if let Err(e) = refreshed {
                        warn!(operation, error = %e, "Failed to refresh local cache");
                    }
                    return Ok(stored);
                }
                Err(e) => self.record_failure(operation, &e),
            }
        }
        on_local(&mut self.local)
    }

    fn write<F, G>(
        &mut self,
        operation: &str,
        on_primary: F,
        on_local: G,
    ) -> Result<Stored<()>, PersistenceError>
    where
        F: FnOnce(&mut P) -> Result<Stored<()>, PersistenceError>,
        G: FnOnce(&mut L) -> Result<Stored<()>, PersistenceError>,
    {
        if !self.is_tripped() {
            match on_primary(&mut self.primary) {
                Ok(stored) => {
                    self.consecutive_failures = 0;
                    if let Err(e) = on_local(&mut self.local) {
                        debug!(operation, error = %e, "Local cache mirror skipped");
                    }
                    return Ok(stored);
                }
                Err(e) if e.is_record_error() => {
                    self.consecutive_failures = 0;
                    return Err(e);
                }
                Err(e) => self.record_failure(operation, &e),
            }
        }
        on_local(&mut self.local)
    }
}

impl<P, L> Repository for FallbackRepository<P, L>
where
    P: Repository,
    L: LocalStore,
{
    fn list_kits(&mut self) -> Result<Stored<Vec<Kit>>, PersistenceError> {
        self.read(
            "list_kits",
            Repository::list_kits,
            LocalStore::replace_kits,
            Repository::list_kits,
        )
    }

    fn list_bookings(&mut self) -> Result<Stored<Vec<Booking>>, PersistenceError> {
        self.read(
            "list_bookings",
            Repository::list_bookings,
            LocalStore::replace_bookings,
            Repository::list_bookings,
        )
    }

    fn create_booking(&mut self, booking: &Booking) -> Result<Stored<()>, PersistenceError> {
        self.write(
            "create_booking",
            |p| p.create_booking(booking),
            |l| l.create_booking(booking),
        )
    }

    fn set_booking_status(
        &mut self,
        booking_id: &BookingId,
        status: BookingStatus,
    ) -> Result<Stored<()>, PersistenceError> {
        self.write(
            "set_booking_status",
            |p| p.set_booking_status(booking_id, status),
            |l| l.set_booking_status(booking_id, status),
        )
    }

    fn create_kit(&mut self, kit: &Kit) -> Result<Stored<()>, PersistenceError> {
        self.write("create_kit", |p| p.create_kit(kit), |l| l.create_kit(kit))
    }

    fn update_kit(&mut self, kit: &Kit) -> Result<Stored<()>, PersistenceError> {
        self.write("update_kit", |p| p.update_kit(kit), |l| l.update_kit(kit))
    }

    fn delete_kit(&mut self, kit_id: &KitId) -> Result<Stored<()>, PersistenceError> {
        self.write(
            "delete_kit",
            |p| p.delete_kit(kit_id),
            |l| l.delete_kit(kit_id),
        )
    }

    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<Stored<()>, PersistenceError> {
        self.write(
            "record_audit_event",
            |p| p.record_audit_event(event),
            |l| l.record_audit_event(event),
        )
    }
}
