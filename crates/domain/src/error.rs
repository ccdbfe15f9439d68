// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::availability::KitConflict;
use crate::validation::BookingViolation;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Booking type string is not recognized.
    InvalidBookingType(String),
    /// Booking status string is not recognized.
    InvalidBookingStatus {
        /// The unrecognized status.
        status: String,
    },
    /// Sales person is empty or not on the roster.
    InvalidSalesPerson(String),
    /// Kit fields are empty or invalid.
    InvalidKit(String),
    /// A status transition is not permitted by the booking lifecycle.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// A booking candidate failed validation.
    ///
    /// Carries every violation found, not just the first.
    InvalidBooking(Vec<BookingViolation>),
    /// One or more selected kits are held by an overlapping booking.
    KitsUnavailable(Vec<KitConflict>),
    /// Booking does not exist.
    BookingNotFound(String),
    /// Kit does not exist.
    KitNotFound(String),
    /// Booking id is already in use.
    DuplicateBooking(String),
    /// Kit id is already in use.
    DuplicateKit(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBookingType(value) => write!(f, "Invalid booking type: {value}"),
            Self::InvalidBookingStatus { status } => {
                write!(f, "Invalid booking status: {status}")
            }
            Self::InvalidSalesPerson(msg) => write!(f, "Invalid sales person: {msg}"),
            Self::InvalidKit(msg) => write!(f, "Invalid kit: {msg}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot move booking from {from} to {to}: {reason}")
            }
            Self::InvalidBooking(violations) => {
                let messages: Vec<String> = violations.iter().map(ToString::to_string).collect();
                write!(f, "Invalid booking: {}", messages.join("; "))
            }
            Self::KitsUnavailable(conflicts) => {
                let details: Vec<String> = conflicts
                    .iter()
                    .map(|c| format!("{} ({})", c.kit_id, c.reason))
                    .collect();
                write!(f, "Kits unavailable: {}", details.join(", "))
            }
            Self::BookingNotFound(id) => write!(f, "Booking '{id}' not found"),
            Self::KitNotFound(id) => write!(f, "Kit '{id}' not found"),
            Self::DuplicateBooking(id) => write!(f, "Booking '{id}' already exists"),
            Self::DuplicateKit(id) => write!(f, "Kit '{id}' already exists"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
