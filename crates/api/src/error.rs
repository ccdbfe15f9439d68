// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use kitloan::CoreError;
use kitloan_domain::{DomainError, KitConflict};
use kitloan_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A booking candidate broke one or more booking rules.
    ValidationFailed {
        /// Every rule message, in check order.
        messages: Vec<String>,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Selected kits are held by overlapping bookings.
    KitsUnavailable {
        /// The conflicting kits and why each is held.
        conflicts: Vec<KitConflict>,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ValidationFailed { messages } => {
                write!(f, "Booking is not valid: {}", messages.join("; "))
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::KitsUnavailable { conflicts } => {
                let listed: Vec<String> = conflicts
                    .iter()
                    .map(|c| format!("{} ({})", c.kit_id, c.reason))
                    .collect();
                write!(f, "Kits unavailable: {}", listed.join(", "))
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidBookingType(value) => ApiError::InvalidInput {
            field: String::from("type"),
            message: format!("Unknown booking type '{value}'"),
        },
        DomainError::InvalidBookingStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown booking status '{status}'"),
        },
        DomainError::InvalidSalesPerson(msg) => ApiError::InvalidInput {
            field: String::from("sales_person"),
            message: msg,
        },
        DomainError::InvalidKit(msg) => ApiError::InvalidInput {
            field: String::from("kit"),
            message: msg,
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("booking_lifecycle"),
                message: format!("Cannot move booking from {from} to {to}: {reason}"),
            }
        }
        DomainError::InvalidBooking(violations) => ApiError::ValidationFailed {
            messages: violations.iter().map(ToString::to_string).collect(),
        },
        DomainError::KitsUnavailable(conflicts) => ApiError::KitsUnavailable { conflicts },
        DomainError::BookingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking '{id}' does not exist"),
        },
        DomainError::KitNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Kit"),
            message: format!("Kit '{id}' does not exist"),
        },
        DomainError::DuplicateBooking(id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_booking_id"),
            message: format!("Booking '{id}' already exists"),
        },
        DomainError::DuplicateKit(id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_kit_id"),
            message: format!("Kit '{id}' already exists"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Missing or duplicate records keep their meaning; every other storage
/// failure becomes `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::BookingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking '{id}' does not exist"),
        },
        PersistenceError::KitNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Kit"),
            message: format!("Kit '{id}' does not exist"),
        },
        PersistenceError::Duplicate(msg) => ApiError::DomainRuleViolation {
            rule: String::from("unique_id"),
            message: msg,
        },
        other => ApiError::Internal {
            message: format!("Storage failure: {other}"),
        },
    }
}
