// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_audit_event, create_test_booking, create_test_kit};
use crate::{
    FallbackRepository, JsonFileCache, PersistenceError, Repository, SqliteRepository,
    StoreSource, Stored,
};
use kitloan_audit::AuditEvent;
use kitloan_domain::{Booking, BookingId, BookingStatus, Kit, KitId};

/// A primary store that is always unreachable and counts how often it was tried.
#[derive(Default)]
struct UnreachableStore {
    calls: u32,
}

impl UnreachableStore {
    fn fail<T>(&mut self) -> Result<Stored<T>, PersistenceError> {
        self.calls += 1;
        Err(PersistenceError::DatabaseConnectionFailed(String::from(
            "connection refused",
        )))
    }
}

impl Repository for UnreachableStore {
    fn list_kits(&mut self) -> Result<Stored<Vec<Kit>>, PersistenceError> {
        self.fail()
    }

    fn list_bookings(&mut self) -> Result<Stored<Vec<Booking>>, PersistenceError> {
        self.fail()
    }

    fn create_booking(&mut self, _booking: &Booking) -> Result<Stored<()>, PersistenceError> {
        self.fail()
    }

    fn set_booking_status(
        &mut self,
        _booking_id: &BookingId,
        _status: BookingStatus,
    ) -> Result<Stored<()>, PersistenceError> {
        self.fail()
    }

    fn create_kit(&mut self, _kit: &Kit) -> Result<Stored<()>, PersistenceError> {
        self.fail()
    }

    fn update_kit(&mut self, _kit: &Kit) -> Result<Stored<()>, PersistenceError> {
        self.fail()
    }

    fn delete_kit(&mut self, _kit_id: &KitId) -> Result<Stored<()>, PersistenceError> {
        self.fail()
    }

    fn record_audit_event(&mut self, _event: &AuditEvent) -> Result<Stored<()>, PersistenceError> {
        self.fail()
    }
}

fn local_cache() -> (tempfile::TempDir, JsonFileCache) {
    let dir = tempfile::tempdir().unwrap();
    let cache = JsonFileCache::open(dir.path()).unwrap();
    (dir, cache)
}

#[test]
fn test_failing_primary_serves_from_local_cache() {
    let (_dir, mut cache) = local_cache();
    cache.create_kit(&create_test_kit("k1", "001")).unwrap();
    let mut repo = FallbackRepository::new(UnreachableStore::default(), cache);

    let kits: Stored<Vec<Kit>> = repo.list_kits().unwrap();

    assert_eq!(kits.source, StoreSource::LocalCache);
    assert_eq!(kits.value, vec![create_test_kit("k1", "001")]);
    assert_eq!(repo.consecutive_failures(), 1);
}

#[test]
fn test_writes_fall_back_to_local_cache() {
    let (_dir, cache) = local_cache();
    let mut repo = FallbackRepository::new(UnreachableStore::default(), cache);
    let booking: Booking = create_test_booking("b1", BookingStatus::Pending, &["k1"]);

    let stored: Stored<()> = repo.create_booking(&booking).unwrap();
    repo.record_audit_event(&create_test_audit_event("CreateBooking"))
        .unwrap();

    assert_eq!(stored.source, StoreSource::LocalCache);
    assert_eq!(repo.list_bookings().unwrap().value, vec![booking]);
}

#[test]
fn test_primary_is_skipped_once_tripped_until_reset() {
    let (_dir, cache) = local_cache();
    let mut repo = FallbackRepository::new(UnreachableStore::default(), cache).with_trip_after(2);

    for _ in 0..5 {
        repo.list_kits().unwrap();
    }
    assert!(repo.is_tripped());
    assert_eq!(repo.primary_mut().calls, 2);

    repo.reset();
    assert!(!repo.is_tripped());
    repo.list_kits().unwrap();
    assert_eq!(repo.primary_mut().calls, 3);
}

#[test]
fn test_healthy_primary_reports_database_and_refreshes_cache() {
    let (_dir, cache) = local_cache();
    let mut primary = SqliteRepository::new_in_memory().unwrap();
    primary.create_kit(&create_test_kit("k1", "001")).unwrap();
    primary
        .create_booking(&create_test_booking("b1", BookingStatus::Active, &["k1"]))
        .unwrap();
    let mut repo = FallbackRepository::new(primary, cache);

    let kits: Stored<Vec<Kit>> = repo.list_kits().unwrap();
    let bookings: Stored<Vec<Booking>> = repo.list_bookings().unwrap();

    assert_eq!(kits.source, StoreSource::Database);
    assert_eq!(bookings.source, StoreSource::Database);
    let mut local: JsonFileCache = repo.local().clone();
    assert_eq!(local.list_kits().unwrap().value, kits.value);
    assert_eq!(local.list_bookings().unwrap().value, bookings.value);
}

#[test]
fn test_recovered_primary_read_drops_local_only_bookings() {
    let (_dir, mut cache) = local_cache();
    let offline: Booking = create_test_booking("b-offline", BookingStatus::Pending, &["k2"]);
    cache.create_booking(&offline).unwrap();
    let mut primary = SqliteRepository::new_in_memory().unwrap();
    let online: Booking = create_test_booking("b1", BookingStatus::Active, &["k1"]);
    primary.create_booking(&online).unwrap();
    let mut repo = FallbackRepository::new(primary, cache);

    let bookings: Stored<Vec<Booking>> = repo.list_bookings().unwrap();

    assert_eq!(bookings.value, vec![online.clone()]);
    let mut local: JsonFileCache = repo.local().clone();
    assert_eq!(local.list_bookings().unwrap().value, vec![online]);
}

#[test]
fn test_empty_primary_read_keeps_local_copy() {
    let (_dir, mut cache) = local_cache();
    let offline: Booking = create_test_booking("b-offline", BookingStatus::Pending, &["k2"]);
    cache.create_booking(&offline).unwrap();
    let primary = SqliteRepository::new_in_memory().unwrap();
    let mut repo = FallbackRepository::new(primary, cache);

    assert!(repo.list_bookings().unwrap().value.is_empty());

    let mut local: JsonFileCache = repo.local().clone();
    assert_eq!(local.list_bookings().unwrap().value, vec![offline]);
}

#[test]
fn test_successful_writes_are_mirrored_locally() {
    let (_dir, cache) = local_cache();
    let primary = SqliteRepository::new_in_memory().unwrap();
    let mut repo = FallbackRepository::new(primary, cache);

    let stored: Stored<()> = repo.create_kit(&create_test_kit("k9", "009")).unwrap();

    assert_eq!(stored.source, StoreSource::Database);
    let mut local: JsonFileCache = repo.local().clone();
    assert_eq!(
        local.list_kits().unwrap().value,
        vec![create_test_kit("k9", "009")]
    );
}

#[test]
fn test_record_errors_from_primary_do_not_fall_back() {
    let (_dir, cache) = local_cache();
    let primary = SqliteRepository::new_in_memory().unwrap();
    let mut repo = FallbackRepository::new(primary, cache);

    let result: Result<Stored<()>, PersistenceError> =
        repo.set_booking_status(&BookingId::new("missing"), BookingStatus::Active);

    assert_eq!(
        result.unwrap_err(),
        PersistenceError::BookingNotFound(String::from("missing"))
    );
    assert_eq!(repo.consecutive_failures(), 0);
}
