// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw operator input; handlers parse it into domain types.

use kitloan_domain::{Booking, BookingId, BookingStatus, Kit, KitConflict, KitId};
use kitloan_persistence::StoreSource;
use serde::Serialize;

/// API request to check kit availability for a date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRequest {
    /// First day of the window (ISO 8601).
    pub date_out: String,
    /// Last day of the window (ISO 8601).
    pub date_return: String,
    /// Optional free-text filter over the catalog.
    pub query: Option<String>,
}

/// One kit's availability, with the catalog fields a picker shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitAvailabilityRow {
    pub kit_id: KitId,
    pub kit_number: String,
    pub category: String,
    pub description: String,
    pub bay: String,
    pub sizes: String,
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_reason: Option<String>,
}

/// API response for an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub date_out: String,
    pub date_return: String,
    /// Rows ordered by kit number.
    pub kits: Vec<KitAvailabilityRow>,
    pub available_count: usize,
    pub unavailable_count: usize,
    pub source: StoreSource,
}

/// API request to record a booking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateBookingRequest {
    /// `IMMEDIATE`, `COLLECTION` or `DELIVERY`.
    pub booking_type: String,
    /// First day out (ISO 8601). May be absent; validation reports it.
    pub date_out: Option<String>,
    /// Day due back (ISO 8601). May be absent; validation reports it.
    pub date_return: Option<String>,
    pub sales_person: String,
    pub organization: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub kit_ids: Vec<String>,
    pub extra_samples: String,
    pub notes: String,
}

/// API response for a recorded booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking: Booking,
    /// Conflicts that were tolerated under the advisory policy.
    pub warnings: Vec<KitConflict>,
    pub source: StoreSource,
    pub message: String,
}

/// API response for a booking status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusResponse {
    pub booking_id: BookingId,
    pub previous_status: BookingStatus,
    pub status: BookingStatus,
    pub source: StoreSource,
    pub message: String,
}

/// API response for the booking board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingBoardResponse {
    /// Active bookings, soonest due back first.
    pub active_out: Vec<Booking>,
    /// Pending bookings, soonest starting first.
    pub forward_queue: Vec<Booking>,
    /// Returned bookings, most recently due first.
    pub archive: Vec<Booking>,
    /// Holds past their return date, most overdue first.
    pub overdue: Vec<BookingId>,
    pub source: StoreSource,
}

/// API response listing the kit catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListKitsResponse {
    pub kits: Vec<Kit>,
    pub source: StoreSource,
}

/// Editable kit fields, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KitRequest {
    pub kit_number: String,
    pub supplier: String,
    pub category: String,
    pub description: String,
    pub bay: String,
    pub sizes: String,
}

/// API response for a created or updated kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitResponse {
    pub kit: Kit,
    pub source: StoreSource,
    pub message: String,
}

/// API response for a deleted kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteKitResponse {
    pub kit_id: KitId,
    /// Bookings still referencing the removed kit.
    pub stale_references: usize,
    pub source: StoreSource,
    pub message: String,
}
