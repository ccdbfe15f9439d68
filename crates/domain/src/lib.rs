// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod availability;
mod booking_status;
mod catalog;
mod error;
mod types;
mod validation;
mod views;

#[cfg(test)]
mod tests;

pub use availability::{
    KitConflict, compute_availability, conflict_reason, ranges_overlap, unavailable_selection,
};
pub use booking_status::{BookingStatus, LifecycleAction};
pub use catalog::{KitRecord, LegacyKitRecord, StandardKitRecord, resolve_kits, search_kits};
pub use views::{
    BookingBoard, active_out, archive, forward_queue, is_overdue, overdue, search_bookings,
};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Booking, BookingId, BookingType, CustomerDetails, Kit, KitAvailability, KitId, SalesPerson,
    parse_iso_date,
};
pub use validation::{
    BookingDraft, BookingViolation, ValidationResult, validate_booking,
    validate_booking_with_roster, validate_kit_fields,
};
