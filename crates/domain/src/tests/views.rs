// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_booking;
use crate::{
    Booking, BookingBoard, BookingStatus, CustomerDetails, KitId, active_out, archive,
    forward_queue, is_overdue, overdue, search_bookings,
};
use time::macros::date;

fn ids(bookings: &[Booking]) -> Vec<&str> {
    bookings.iter().map(|b| b.id.value()).collect()
}

fn sample_bookings() -> Vec<Booking> {
    vec![
        create_test_booking(
            "active-late",
            BookingStatus::Active,
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 20),
        ),
        create_test_booking(
            "pending-late",
            BookingStatus::Pending,
            date!(2024 - 02 - 10),
            date!(2024 - 02 - 12),
        ),
        create_test_booking(
            "returned-old",
            BookingStatus::Returned,
            date!(2023 - 11 - 01),
            date!(2023 - 11 - 05),
        ),
        create_test_booking(
            "active-soon",
            BookingStatus::Active,
            date!(2024 - 01 - 02),
            date!(2024 - 01 - 08),
        ),
        create_test_booking(
            "pending-soon",
            BookingStatus::Pending,
            date!(2024 - 01 - 15),
            date!(2024 - 01 - 18),
        ),
        create_test_booking(
            "returned-recent",
            BookingStatus::Returned,
            date!(2023 - 12 - 01),
            date!(2023 - 12 - 24),
        ),
    ]
}

#[test]
fn test_active_out_sorted_by_return_date() {
    let bookings: Vec<Booking> = sample_bookings();

    assert_eq!(ids(&active_out(&bookings)), vec!["active-soon", "active-late"]);
}

#[test]
fn test_forward_queue_sorted_by_date_out() {
    let bookings: Vec<Booking> = sample_bookings();

    assert_eq!(
        ids(&forward_queue(&bookings)),
        vec!["pending-soon", "pending-late"]
    );
}

#[test]
fn test_archive_sorted_most_recent_first() {
    let bookings: Vec<Booking> = sample_bookings();

    assert_eq!(
        ids(&archive(&bookings)),
        vec!["returned-recent", "returned-old"]
    );
}

#[test]
fn test_projections_are_idempotent() {
    let bookings: Vec<Booking> = sample_bookings();

    let first: BookingBoard = BookingBoard::derive(&bookings);
    let second: BookingBoard = BookingBoard::derive(&bookings);

    assert_eq!(first, second);
}

#[test]
fn test_equal_dates_keep_input_order() {
    let bookings: Vec<Booking> = vec![
        create_test_booking(
            "first",
            BookingStatus::Active,
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 10),
        ),
        create_test_booking(
            "second",
            BookingStatus::Active,
            date!(2024 - 01 - 03),
            date!(2024 - 01 - 10),
        ),
    ];

    assert_eq!(ids(&active_out(&bookings)), vec!["first", "second"]);
}

#[test]
fn test_board_partitions_by_status() {
    let bookings: Vec<Booking> = sample_bookings();

    let board: BookingBoard = BookingBoard::derive(&bookings);

    assert_eq!(
        board.active_out.len() + board.forward_queue.len() + board.archive.len(),
        bookings.len()
    );
}

#[test]
fn test_overdue_only_counts_holds() {
    let bookings: Vec<Booking> = sample_bookings();
    let today = date!(2024 - 01 - 19);

    assert_eq!(ids(&overdue(&bookings, today)), vec!["active-soon", "pending-soon"]);
    assert!(!is_overdue(&bookings[2], today));
}

#[test]
fn test_not_overdue_on_return_day() {
    let booking: Booking = create_test_booking(
        "due-today",
        BookingStatus::Active,
        date!(2024 - 01 - 01),
        date!(2024 - 01 - 10),
    );

    assert!(!is_overdue(&booking, date!(2024 - 01 - 10)));
    assert!(is_overdue(&booking, date!(2024 - 01 - 11)));
}

fn searchable_bookings() -> Vec<Booking> {
    let mut school: Booking = create_test_booking(
        "b-school",
        BookingStatus::Pending,
        date!(2024 - 03 - 01),
        date!(2024 - 03 - 05),
    );
    school.customer =
        CustomerDetails::new("St Peters College", "Jo Bloggs", "office@school.test", "");
    school.kit_ids = vec![KitId::new("kit-hoodie"), KitId::new("kit-polo")];

    let mut club: Booking = create_test_booking(
        "b-club",
        BookingStatus::Active,
        date!(2024 - 03 - 02),
        date!(2024 - 03 - 06),
    );
    club.customer = CustomerDetails::new("Harbour Rowing", "Ana Diaz", "", "");
    club.kit_ids = vec![KitId::new("kit-singlet")];

    vec![school, club]
}

#[test]
fn test_blank_booking_query_returns_every_booking() {
    let bookings: Vec<Booking> = searchable_bookings();

    assert_eq!(search_bookings(&bookings, ""), bookings);
    assert_eq!(search_bookings(&bookings, "   "), bookings);
}

#[test]
fn test_booking_search_matches_each_field_case_insensitively() {
    let bookings: Vec<Booking> = searchable_bookings();

    assert_eq!(ids(&search_bookings(&bookings, "peters")), vec!["b-school"]);
    assert_eq!(ids(&search_bookings(&bookings, "ANA")), vec!["b-club"]);
    assert_eq!(ids(&search_bookings(&bookings, "B-CLUB")), vec!["b-club"]);
    assert_eq!(ids(&search_bookings(&bookings, "Polo")), vec!["b-school"]);
    assert_eq!(ids(&search_bookings(&bookings, "kit-")), vec!["b-school", "b-club"]);
}

#[test]
fn test_booking_search_ignores_unlisted_fields() {
    let mut bookings: Vec<Booking> = searchable_bookings();
    bookings[0].notes = String::from("fragile");

    assert!(search_bookings(&bookings, "fragile").is_empty());
    assert!(search_bookings(&bookings, "office@school").is_empty());
}
