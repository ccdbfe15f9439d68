// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Kit availability calculation.
//!
//! Read-only aggregation of the booking history into a per-kit
//! availability answer for a requested date window. Availability is
//! information, not enforcement: nothing here rejects a booking.

use crate::types::{Booking, Kit, KitAvailability, KitId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// A selected kit that is held by an overlapping booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitConflict {
    pub kit_id: KitId,
    pub reason: String,
}

/// Closed-interval overlap test.
///
/// Two inclusive date ranges overlap if they share at least one day, so
/// a range ending on the day another starts counts as overlapping.
#[must_use]
pub fn ranges_overlap(a_start: Date, a_end: Date, b_start: Date, b_end: Date) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Human-readable reason a kit held by `booking` is unavailable.
#[must_use]
pub fn conflict_reason(booking: &Booking) -> String {
    format!(
        "Booked until {} ({})",
        booking.date_return, booking.customer.organization
    )
}

/// Computes the availability of every kit in the catalog for an inclusive
/// date window.
///
/// # Arguments
///
/// * `kits` - The complete kit catalog
/// * `bookings` - The complete booking history, all statuses
/// * `range_start` - First day of the window (inclusive)
/// * `range_end` - Last day of the window (inclusive)
///
/// # Returns
///
/// A map whose keys are exactly the ids in `kits`. A kit is unavailable if
/// any non-returned booking overlapping the window references it. When
/// several such bookings hold the same kit, the reason names the last one
/// in `bookings` order.
///
/// `range_end < range_start` is not rejected; the overlap formula is
/// applied as given.
#[must_use]
pub fn compute_availability(
    kits: &[Kit],
    bookings: &[Booking],
    range_start: Date,
    range_end: Date,
) -> BTreeMap<KitId, KitAvailability> {
    let mut availability: BTreeMap<KitId, KitAvailability> = kits
        .iter()
        .map(|kit| (kit.id.clone(), KitAvailability::available(kit.id.clone())))
        .collect();

    for booking in bookings.iter().filter(|b| b.is_hold()) {
        if !ranges_overlap(range_start, range_end, booking.date_out, booking.date_return) {
            continue;
        }

        for kit_id in &booking.kit_ids {
            // Stale references to deleted kits are ignored
            if let Some(entry) = availability.get_mut(kit_id) {
                entry.is_available = false;
                entry.conflict_reason = Some(conflict_reason(booking));
            }
        }
    }

    availability
}

/// Returns the kits of `selection` that are unavailable in `availability`.
///
/// Ids that are not in the availability map (not in the catalog) are
/// skipped. Output follows selection order.
#[must_use]
pub fn unavailable_selection(
    selection: &[KitId],
    availability: &BTreeMap<KitId, KitAvailability>,
) -> Vec<KitConflict> {
    selection
        .iter()
        .filter_map(|kit_id| availability.get(kit_id))
        .filter(|entry| !entry.is_available)
        .map(|entry| KitConflict {
            kit_id: entry.kit_id.clone(),
            reason: entry.conflict_reason.clone().unwrap_or_default(),
        })
        .collect()
}
