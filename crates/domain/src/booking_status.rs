// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status tracking and transition logic.
//!
//! Status changes are operator-initiated only; the system never advances a
//! booking because a date has passed.

use crate::error::DomainError;
use crate::types::BookingType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Reserved, kits not yet handed over
    Pending,
    /// Kits are with the client
    Active,
    /// Kits are back on the shelf
    Returned,
}

/// Lifecycle events a booking goes through, as seen by notification consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleAction {
    /// The booking was recorded.
    Created,
    /// The kits were collected (pending -> active).
    Collected,
    /// The kits came back (active -> returned).
    Returned,
}

impl LifecycleAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Collected => "COLLECTED",
            Self::Returned => "RETURNED",
        }
    }
}

impl BookingStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Returned => "RETURNED",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBookingStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "ACTIVE" => Ok(Self::Active),
            "RETURNED" => Ok(Self::Returned),
            _ => Err(DomainError::InvalidBookingStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns the status a new booking of the given type starts in.
    ///
    /// Immediate bookings leave with the client, so they start active.
    #[must_use]
    pub const fn initial_for(booking_type: BookingType) -> Self {
        match booking_type {
            BookingType::Immediate => Self::Active,
            BookingType::Collection | BookingType::Delivery => Self::Pending,
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Returned)
    }

    /// Checks if a transition from this status to another is permitted.
    ///
    /// Valid transitions are:
    /// - `Pending` → `Active`
    /// - `Active` → `Returned`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Active) | (Self::Active, Self::Returned)
        )
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        if self.can_transition_to(new_status) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by booking lifecycle rules".to_string(),
            })
        }
    }

    /// Returns the lifecycle action announced when moving from this status
    /// to `target`, if the move is a permitted transition.
    #[must_use]
    pub const fn lifecycle_action(&self, target: Self) -> Option<LifecycleAction> {
        match (self, target) {
            (Self::Pending, Self::Active) => Some(LifecycleAction::Collected),
            (Self::Active, Self::Returned) => Some(LifecycleAction::Returned),
            _ => None,
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
