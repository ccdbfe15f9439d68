// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use kitloan_domain::{BookingDraft, BookingId, Kit, KitId};
use time::OffsetDateTime;

/// A command represents operator intent as data only.
///
/// Commands are the only way to request state changes. Identifiers and
/// timestamps are supplied by the caller so `apply` stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record a new booking from an operator-entered draft.
    CreateBooking {
        /// The identifier to assign to the new booking.
        booking_id: BookingId,
        /// When the booking was taken.
        created_at: OffsetDateTime,
        /// The unvalidated booking candidate.
        draft: BookingDraft,
    },
    /// Mark a pending booking as collected by the client.
    ActivateBooking {
        /// The booking to activate.
        booking_id: BookingId,
    },
    /// Mark an active booking as returned, releasing its kits.
    ReturnBooking {
        /// The booking to close.
        booking_id: BookingId,
    },
    /// Add a kit to the catalog.
    CreateKit {
        /// The kit to add.
        kit: Kit,
    },
    /// Replace every field of an existing kit except its id.
    UpdateKit {
        /// The kit with its new field values.
        kit: Kit,
    },
    /// Remove a kit from the catalog.
    ///
    /// Bookings that reference the kit keep the stale reference.
    DeleteKit {
        /// The kit to remove.
        kit_id: KitId,
    },
}

impl Command {
    /// Returns the action name recorded in the audit trail.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateBooking { .. } => "CreateBooking",
            Self::ActivateBooking { .. } => "ActivateBooking",
            Self::ReturnBooking { .. } => "ReturnBooking",
            Self::CreateKit { .. } => "CreateKit",
            Self::UpdateKit { .. } => "UpdateKit",
            Self::DeleteKit { .. } => "DeleteKit",
        }
    }
}
