// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived projections of the booking list.
//!
//! Every projection is recomputed from the full list on each call. Sorts
//! are stable, so bookings sharing a date keep their input order.

use crate::booking_status::BookingStatus;
use crate::types::Booking;
use std::cmp::Reverse;
use time::Date;

/// Bookings currently with clients, soonest due back first.
#[must_use]
pub fn active_out(bookings: &[Booking]) -> Vec<Booking> {
    let mut out: Vec<Booking> = with_status(bookings, BookingStatus::Active);
    out.sort_by_key(|b| b.date_return);
    out
}

/// Reservations not yet collected, soonest starting first.
#[must_use]
pub fn forward_queue(bookings: &[Booking]) -> Vec<Booking> {
    let mut queue: Vec<Booking> = with_status(bookings, BookingStatus::Pending);
    queue.sort_by_key(|b| b.date_out);
    queue
}

/// Closed bookings, most recently due back first.
#[must_use]
pub fn archive(bookings: &[Booking]) -> Vec<Booking> {
    let mut history: Vec<Booking> = with_status(bookings, BookingStatus::Returned);
    history.sort_by_key(|b| Reverse(b.date_return));
    history
}

/// Returns whether a booking still holds its kits past its return date.
#[must_use]
pub fn is_overdue(booking: &Booking, today: Date) -> bool {
    booking.is_hold() && booking.date_return < today
}

/// Holds whose return date has passed, most overdue first.
#[must_use]
pub fn overdue(bookings: &[Booking], today: Date) -> Vec<Booking> {
    let mut late: Vec<Booking> = bookings
        .iter()
        .filter(|b| is_overdue(b, today))
        .cloned()
        .collect();
    late.sort_by_key(|b| b.date_return);
    late
}

/// Bookings matching a free-text query, in input order.
///
/// Matches case-insensitively against the organization, the contact name,
/// the booking id and every referenced kit id. A blank query matches all.
#[must_use]
pub fn search_bookings(bookings: &[Booking], query: &str) -> Vec<Booking> {
    let needle: String = query.trim().to_lowercase();
    if needle.is_empty() {
        return bookings.to_vec();
    }

    bookings
        .iter()
        .filter(|b| {
            b.customer.organization.to_lowercase().contains(&needle)
                || b.customer.name.to_lowercase().contains(&needle)
                || b.id.value().to_lowercase().contains(&needle)
                || b
                    .kit_ids
                    .iter()
                    .any(|id| id.value().to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

fn with_status(bookings: &[Booking], status: BookingStatus) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| b.status == status)
        .cloned()
        .collect()
}

/// All three board projections derived from one booking list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingBoard {
    pub active_out: Vec<Booking>,
    pub forward_queue: Vec<Booking>,
    pub archive: Vec<Booking>,
}

impl BookingBoard {
    /// Derives the board from the full booking list.
    #[must_use]
    pub fn derive(bookings: &[Booking]) -> Self {
        Self {
            active_out: active_out(bookings),
            forward_queue: forward_queue(bookings),
            archive: archive(bookings),
        }
    }
}
