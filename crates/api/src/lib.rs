// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation layer of the kit loan register.
//!
//! Handlers take raw operator input, run it through the core state
//! machine, persist the result through a `Repository`, and emit audit
//! events and lifecycle notices.

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

mod config;
mod error;
mod handlers;
mod notify;
mod request_response;

#[cfg(test)]
mod tests;

pub use config::{AvailabilityPolicy, RegisterConfig};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    ApiResult, activate_booking, booking_board, check_availability, create_booking, create_kit,
    delete_kit, list_kits, return_booking, update_kit,
};
pub use notify::{BookingNotice, Notifier, TracingNotifier};
pub use request_response::{
    AvailabilityRequest, AvailabilityResponse, BookingBoardResponse, BookingStatusResponse,
    CreateBookingRequest, CreateBookingResponse, DeleteKitResponse, KitAvailabilityRow,
    KitRequest, KitResponse, ListKitsResponse,
};
