// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use kitloan_audit::{AuditEvent, StateSnapshot};
use kitloan_domain::{Booking, BookingId, BookingStatus, Kit, KitId};

/// A snapshot of the register: the kit catalog and every booking.
///
/// State is a value. Transitions build a new `State` and leave the
/// original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// The kit catalog.
    pub kits: Vec<Kit>,
    /// All bookings, in the order they were loaded.
    pub bookings: Vec<Booking>,
}

impl State {
    /// Creates an empty register.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kits: Vec::new(),
            bookings: Vec::new(),
        }
    }

    /// Creates a state from previously loaded kits and bookings.
    #[must_use]
    pub const fn from_parts(kits: Vec<Kit>, bookings: Vec<Booking>) -> Self {
        Self { kits, bookings }
    }

    /// Looks up a booking by id.
    #[must_use]
    pub fn find_booking(&self, booking_id: &BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| &b.id == booking_id)
    }

    /// Looks up a kit by id.
    #[must_use]
    pub fn find_kit(&self, kit_id: &KitId) -> Option<&Kit> {
        self.kits.iter().find(|k| &k.id == kit_id)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let count = |status: BookingStatus| -> usize {
            self.bookings.iter().filter(|b| b.status == status).count()
        };
        StateSnapshot::new(format!(
            "kits={},pending={},active={},returned={}",
            self.kits.len(),
            count(BookingStatus::Pending),
            count(BookingStatus::Active),
            count(BookingStatus::Returned)
        ))
    }
}

/// The single record-level change a transition made.
///
/// Callers persist this instead of diffing whole states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    BookingCreated(Booking),
    BookingStatusChanged {
        booking_id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    },
    KitCreated(Kit),
    KitUpdated(Kit),
    KitDeleted(KitId),
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// What changed.
    pub change: Change,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
