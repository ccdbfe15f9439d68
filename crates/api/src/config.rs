// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Register-wide settings applied by the handlers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What happens when a new booking selects kits that are already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityPolicy {
    /// Conflicts are logged and the booking is recorded anyway.
    #[default]
    Advisory,
    /// A booking with conflicting kits is rejected.
    Enforced,
}

impl AvailabilityPolicy {
    /// Returns the string representation of the policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Advisory => "advisory",
            Self::Enforced => "enforced",
        }
    }
}

impl FromStr for AvailabilityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advisory" => Ok(Self::Advisory),
            "enforced" => Ok(Self::Enforced),
            other => Err(format!(
                "unknown availability policy '{other}' (expected 'advisory' or 'enforced')"
            )),
        }
    }
}

impl std::fmt::Display for AvailabilityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for booking creation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterConfig {
    pub availability_policy: AvailabilityPolicy,
    /// Staff allowed to take bookings. Empty means anyone.
    pub sales_roster: Vec<String>,
}

impl RegisterConfig {
    /// Creates a new `RegisterConfig`.
    #[must_use]
    pub const fn new(availability_policy: AvailabilityPolicy, sales_roster: Vec<String>) -> Self {
        Self {
            availability_policy,
            sales_roster,
        }
    }
}
