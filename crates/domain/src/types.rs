// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

time::serde::format_description!(pub(crate) iso_date, Date, "[year]-[month]-[day]");

/// Opaque, stable identifier of a kit.
///
/// Assigned once at creation and never changed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KitId(String);

impl KitId {
    /// Creates a new `KitId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque, stable identifier of a booking.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Creates a new `BookingId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reusable physical sizing-kit asset.
///
/// Every field except `id` may change through an inventory update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kit {
    /// The catalog identity of this kit.
    pub id: KitId,
    /// Human-facing display label (e.g. "001"). Not unique across history.
    pub kit_number: String,
    /// The supplier code.
    pub supplier: String,
    /// Garment category (e.g. "Hoodies").
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Storage location.
    pub bay: String,
    /// Free-text description of the size run.
    pub sizes: String,
}

impl Kit {
    /// Creates a new `Kit`.
    #[must_use]
    pub fn new(
        id: KitId,
        kit_number: &str,
        supplier: &str,
        category: &str,
        description: &str,
        bay: &str,
        sizes: &str,
    ) -> Self {
        Self {
            id,
            kit_number: kit_number.to_string(),
            supplier: supplier.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            bay: bay.to_string(),
            sizes: sizes.to_string(),
        }
    }
}

/// Contact details of the client holding a booking.
///
/// No independent identity; lives and dies with its booking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub organization: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerDetails {
    /// Creates new `CustomerDetails`.
    #[must_use]
    pub fn new(organization: &str, name: &str, email: &str, phone: &str) -> Self {
        Self {
            organization: organization.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }
}

/// Logistics mode of a booking. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingType {
    /// Kits leave the building with the client right away.
    Immediate,
    /// Client collects the kits at a later date.
    Collection,
    /// Kits are delivered to the client.
    Delivery,
}

impl BookingType {
    /// Returns the string representation used for storage and display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "IMMEDIATE",
            Self::Collection => "COLLECTION",
            Self::Delivery => "DELIVERY",
        }
    }
}

impl FromStr for BookingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IMMEDIATE" => Ok(Self::Immediate),
            "COLLECTION" => Ok(Self::Collection),
            "DELIVERY" => Ok(Self::Delivery),
            _ => Err(DomainError::InvalidBookingType(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The staff member responsible for a booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalesPerson(String);

impl SalesPerson {
    /// Creates a new `SalesPerson`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let trimmed: &str = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidSalesPerson(String::from(
                "Sales person cannot be empty",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the staff member's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A reservation of kits (and/or loose samples) for a client over an
/// inclusive date interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub status: BookingStatus,
    /// First day the kits are out (inclusive).
    #[serde(with = "iso_date")]
    pub date_out: Date,
    /// Day the kits are due back (inclusive).
    #[serde(with = "iso_date")]
    pub date_return: Date,
    pub sales_person: SalesPerson,
    pub customer: CustomerDetails,
    /// Weak references into the kit catalog.
    pub kit_ids: Vec<KitId>,
    pub extra_samples: String,
    pub notes: String,
}

impl Booking {
    /// Returns whether this booking still occupies its kits.
    ///
    /// Both `PENDING` and `ACTIVE` bookings hold; only `RETURNED` releases.
    #[must_use]
    pub fn is_hold(&self) -> bool {
        self.status != BookingStatus::Returned
    }

    /// Returns whether this booking references the given kit.
    #[must_use]
    pub fn references_kit(&self, kit_id: &KitId) -> bool {
        self.kit_ids.contains(kit_id)
    }
}

/// Availability of one kit for a queried date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitAvailability {
    pub kit_id: KitId,
    pub is_available: bool,
    /// Names the return date and the holding organization when unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_reason: Option<String>,
}

impl KitAvailability {
    /// Creates an available entry for a kit.
    #[must_use]
    pub const fn available(kit_id: KitId) -> Self {
        Self {
            kit_id,
            is_available: true,
            conflict_reason: None,
        }
    }
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), &format).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}
