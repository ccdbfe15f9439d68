// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    RecordingNotifier, book, create_test_actor, create_test_cause, create_test_repo,
};
use crate::{
    ApiError, AvailabilityRequest, AvailabilityResponse, KitAvailabilityRow, check_availability,
    return_booking,
};
use kitloan_domain::BookingId;
use kitloan_persistence::{SqliteRepository, StoreSource};

fn window(date_out: &str, date_return: &str) -> AvailabilityRequest {
    AvailabilityRequest {
        date_out: date_out.to_string(),
        date_return: date_return.to_string(),
        query: None,
    }
}

fn is_available(response: &AvailabilityResponse, kit_id: &str) -> bool {
    response
        .kits
        .iter()
        .find(|row| row.kit_id.value() == kit_id)
        .map(|row| row.is_available)
        .unwrap()
}

#[test]
fn test_empty_register_has_every_kit_available() {
    let mut repo: SqliteRepository = create_test_repo();

    let response: AvailabilityResponse =
        check_availability(&mut repo, &window("2024-03-01", "2024-03-05")).unwrap();

    assert_eq!(response.kits.len(), 3);
    assert_eq!(response.available_count, 3);
    assert_eq!(response.unavailable_count, 0);
    assert_eq!(response.source, StoreSource::Database);
    assert!(response.kits.iter().all(|row| row.conflict_reason.is_none()));
}

#[test]
fn test_rows_are_ordered_by_kit_number() {
    let mut repo: SqliteRepository = create_test_repo();

    let response: AvailabilityResponse =
        check_availability(&mut repo, &window("2024-03-01", "2024-03-05")).unwrap();

    let numbers: Vec<&str> = response
        .kits
        .iter()
        .map(|row| row.kit_number.as_str())
        .collect();
    assert_eq!(numbers, vec!["001", "002", "003"]);
}

#[test]
fn test_held_kit_is_unavailable_with_reason() {
    let mut repo: SqliteRepository = create_test_repo();
    book(&mut repo, "IMMEDIATE", &["k1"], "2024-03-01", "2024-03-05");

    let response: AvailabilityResponse =
        check_availability(&mut repo, &window("2024-03-03", "2024-03-10")).unwrap();

    let row: &KitAvailabilityRow = response
        .kits
        .iter()
        .find(|r| r.kit_id.value() == "k1")
        .unwrap();
    assert!(!row.is_available);
    assert_eq!(
        row.conflict_reason.as_deref(),
        Some("Booked until 2024-03-05 (Acme)")
    );
    assert_eq!(response.available_count, 2);
    assert_eq!(response.unavailable_count, 1);
}

#[test]
fn test_pending_booking_holds_kits() {
    let mut repo: SqliteRepository = create_test_repo();
    book(&mut repo, "COLLECTION", &["k2"], "2024-03-01", "2024-03-05");

    let response: AvailabilityResponse =
        check_availability(&mut repo, &window("2024-03-02", "2024-03-02")).unwrap();

    assert!(!is_available(&response, "k2"));
}

#[test]
fn test_window_boundaries_are_inclusive() {
    let mut repo: SqliteRepository = create_test_repo();
    book(&mut repo, "IMMEDIATE", &["k1"], "2024-03-01", "2024-03-05");

    let touching: AvailabilityResponse =
        check_availability(&mut repo, &window("2024-03-05", "2024-03-07")).unwrap();
    let after: AvailabilityResponse =
        check_availability(&mut repo, &window("2024-03-06", "2024-03-07")).unwrap();

    assert!(!is_available(&touching, "k1"));
    assert!(is_available(&after, "k1"));
}

#[test]
fn test_returned_booking_releases_kits() {
    let mut repo: SqliteRepository = create_test_repo();
    let booking_id: BookingId =
        book(&mut repo, "IMMEDIATE", &["k1"], "2024-03-01", "2024-03-05");
    return_booking(
        &mut repo,
        &RecordingNotifier::default(),
        booking_id.value(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let response: AvailabilityResponse =
        check_availability(&mut repo, &window("2024-03-01", "2024-03-05")).unwrap();

    assert!(is_available(&response, "k1"));
}

#[test]
fn test_query_filters_rows() {
    let mut repo: SqliteRepository = create_test_repo();
    let mut request: AvailabilityRequest = window("2024-03-01", "2024-03-05");
    request.query = Some(String::from("HOOD"));

    let response: AvailabilityResponse = check_availability(&mut repo, &request).unwrap();

    assert_eq!(response.kits.len(), 1);
    assert_eq!(response.kits[0].kit_id.value(), "k3");
}

#[test]
fn test_unparseable_date_is_invalid_input() {
    let mut repo: SqliteRepository = create_test_repo();

    let result = check_availability(&mut repo, &window("01/03/2024", "2024-03-05"));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));
}
