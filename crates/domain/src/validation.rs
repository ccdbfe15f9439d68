// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{BookingType, CustomerDetails, Kit, KitId, iso_date};
use serde::{Deserialize, Serialize};
use time::Date;

/// An unpersisted booking candidate as entered by an operator.
///
/// Dates are optional here because the form may be submitted without
/// them; `validate_booking` reports the gap instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    #[serde(default, with = "iso_date::option")]
    pub date_out: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub date_return: Option<Date>,
    /// The responsible staff member as entered, before trimming.
    #[serde(default)]
    pub sales_person: String,
    pub customer: CustomerDetails,
    #[serde(default)]
    pub kit_ids: Vec<KitId>,
    #[serde(default)]
    pub extra_samples: String,
    #[serde(default)]
    pub notes: String,
}

/// A single rule a booking candidate broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingViolation {
    MissingDateOut,
    MissingDateReturn,
    MissingOrganization,
    MissingContactName,
    MissingSalesPerson,
    UnknownSalesPerson,
    EmptySelection,
    ReturnBeforeDateOut,
}

impl BookingViolation {
    /// Returns the operator-facing message for this violation.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::MissingDateOut => "Date out is required",
            Self::MissingDateReturn => "Return date is required",
            Self::MissingOrganization => "Organization is required",
            Self::MissingContactName => "Contact name is required",
            Self::MissingSalesPerson => "Sales person is required",
            Self::UnknownSalesPerson => "Sales person is not on the sales roster",
            Self::EmptySelection => "Select at least one kit or describe extra samples",
            Self::ReturnBeforeDateOut => "Return date must not be before date out",
        }
    }
}

impl std::fmt::Display for BookingViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Outcome of validating a booking candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub violations: Vec<BookingViolation>,
}

impl ValidationResult {
    /// Returns true when no rule was broken.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the human-readable message of every violation, in check order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Converts the result into a `Result`, failing with every violation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBooking` if any rule was broken.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(DomainError::InvalidBooking(self.violations))
        }
    }
}

/// Validates a booking candidate before it is persisted.
///
/// Every check runs; none short-circuits another, so the caller sees all
/// problems at once. Availability is not consulted here.
///
/// The chronological check passes only when both dates are present and
/// the return date is on or after the date out.
#[must_use]
pub fn validate_booking(draft: &BookingDraft) -> ValidationResult {
    let mut violations: Vec<BookingViolation> = Vec::new();

    if draft.date_out.is_none() {
        violations.push(BookingViolation::MissingDateOut);
    }

    if draft.date_return.is_none() {
        violations.push(BookingViolation::MissingDateReturn);
    }

    if draft.customer.organization.trim().is_empty() {
        violations.push(BookingViolation::MissingOrganization);
    }

    if draft.customer.name.trim().is_empty() {
        violations.push(BookingViolation::MissingContactName);
    }

    if draft.sales_person.trim().is_empty() {
        violations.push(BookingViolation::MissingSalesPerson);
    }

    if draft.kit_ids.is_empty() && draft.extra_samples.trim().is_empty() {
        violations.push(BookingViolation::EmptySelection);
    }

    let in_order: bool = matches!(
        (draft.date_out, draft.date_return),
        (Some(out), Some(back)) if back >= out
    );
    if !in_order {
        violations.push(BookingViolation::ReturnBeforeDateOut);
    }

    ValidationResult { violations }
}

/// Validates that a kit's basic field constraints are met.
///
/// # Errors
///
/// Returns an error if the kit number or id is empty.
pub fn validate_kit_fields(kit: &Kit) -> Result<(), DomainError> {
    if kit.id.value().trim().is_empty() {
        return Err(DomainError::InvalidKit(String::from(
            "Kit id cannot be empty",
        )));
    }

    if kit.kit_number.trim().is_empty() {
        return Err(DomainError::InvalidKit(String::from(
            "Kit number cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a booking candidate and checks its sales person against a roster.
///
/// Runs every `validate_booking` check, then adds `UnknownSalesPerson`
/// when the roster is non-empty and does not list the named person. The
/// roster violation sits beside the others rather than replacing them.
#[must_use]
pub fn validate_booking_with_roster(draft: &BookingDraft, roster: &[String]) -> ValidationResult {
    let mut result: ValidationResult = validate_booking(draft);
    let name: &str = draft.sales_person.trim();
    if !name.is_empty() && !on_roster(name, roster) {
        result.violations.push(BookingViolation::UnknownSalesPerson);
    }
    result
}

/// An empty roster accepts anyone.
fn on_roster(name: &str, roster: &[String]) -> bool {
    roster.is_empty() || roster.iter().any(|listed| listed.trim() == name.trim())
}
