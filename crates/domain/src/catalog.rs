// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Kit catalog lookups and record normalization.

use crate::types::{Kit, KitId};
use serde::{Deserialize, Deserializer, Serialize};

/// Filters the catalog by a free-text query.
///
/// Matches case-insensitively against kit number, category, description
/// and supplier. A blank query returns the whole catalog.
#[must_use]
pub fn search_kits<'a>(kits: &'a [Kit], query: &str) -> Vec<&'a Kit> {
    let needle: String = query.trim().to_lowercase();
    if needle.is_empty() {
        return kits.iter().collect();
    }

    kits.iter()
        .filter(|kit| {
            [&kit.kit_number, &kit.category, &kit.description, &kit.supplier]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Resolves kit references against the catalog, in reference order.
///
/// References to kits that no longer exist are skipped.
#[must_use]
pub fn resolve_kits<'a>(kit_ids: &[KitId], kits: &'a [Kit]) -> Vec<&'a Kit> {
    kit_ids
        .iter()
        .filter_map(|id| kits.iter().find(|kit| &kit.id == id))
        .collect()
}

/// A kit record in the current storage shape.
///
/// The id is optional so records written without one can still be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardKitRecord {
    #[serde(default)]
    pub id: Option<KitId>,
    #[serde(default = "unknown_kit_number")]
    pub kit_number: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bay: String,
    #[serde(default)]
    pub sizes: String,
}

/// A kit record in the original short-key spreadsheet shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyKitRecord {
    pub no: Option<String>,
    #[serde(default)]
    pub sup: Option<String>,
    #[serde(default)]
    pub cat: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub bay: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

/// A stored kit record in either known shape.
///
/// A record is read as legacy only when it carries a non-blank `no`, `sup`
/// or `cat`. Objects with none of the known keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KitRecord {
    Standard(StandardKitRecord),
    Legacy(LegacyKitRecord),
}

fn unknown_kit_number() -> String {
    String::from("?")
}

fn filled(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// First non-blank of a legacy key and its current-shape counterpart.
fn first_filled(legacy: Option<String>, current: Option<String>) -> Option<String> {
    legacy
        .filter(|v| !v.trim().is_empty())
        .or_else(|| current.filter(|v| !v.trim().is_empty()))
}

/// Every key either shape may carry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKitRecord {
    id: Option<KitId>,
    kit_number: Option<String>,
    supplier: Option<String>,
    category: Option<String>,
    description: Option<String>,
    bay: Option<String>,
    sizes: Option<String>,
    no: Option<String>,
    sup: Option<String>,
    cat: Option<String>,
    desc: Option<String>,
    size: Option<String>,
}

impl TryFrom<RawKitRecord> for KitRecord {
    type Error = &'static str;

    fn try_from(raw: RawKitRecord) -> Result<Self, Self::Error> {
        if filled(raw.no.as_ref()) || filled(raw.sup.as_ref()) || filled(raw.cat.as_ref()) {
            return Ok(Self::Legacy(LegacyKitRecord {
                no: first_filled(raw.no, raw.kit_number),
                sup: first_filled(raw.sup, raw.supplier),
                cat: first_filled(raw.cat, raw.category),
                desc: first_filled(raw.desc, raw.description),
                bay: raw.bay,
                size: first_filled(raw.size, raw.sizes),
            }));
        }

        let has_current_key: bool = raw.id.is_some()
            || raw.kit_number.is_some()
            || raw.supplier.is_some()
            || raw.category.is_some()
            || raw.description.is_some()
            || raw.bay.is_some()
            || raw.sizes.is_some();
        if !has_current_key {
            return Err("record matches neither kit shape");
        }

        Ok(Self::Standard(StandardKitRecord {
            id: raw.id,
            kit_number: raw.kit_number.unwrap_or_else(unknown_kit_number),
            supplier: raw.supplier.unwrap_or_default(),
            category: raw.category.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            bay: raw.bay.unwrap_or_default(),
            sizes: raw.sizes.unwrap_or_default(),
        }))
    }
}

impl<'de> Deserialize<'de> for KitRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: RawKitRecord = RawKitRecord::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl KitRecord {
    /// Returns true when normalizing this record will assign a fresh id.
    #[must_use]
    pub const fn needs_id(&self) -> bool {
        match self {
            Self::Standard(record) => record.id.is_none(),
            Self::Legacy(_) => true,
        }
    }

    /// Converts the record into a catalog `Kit`.
    ///
    /// # Arguments
    ///
    /// * `new_id` - Called for a fresh id when the record carries none
    pub fn normalize<F>(self, new_id: F) -> Kit
    where
        F: FnOnce() -> KitId,
    {
        match self {
            Self::Standard(record) => Kit {
                id: record.id.unwrap_or_else(new_id),
                kit_number: record.kit_number,
                supplier: record.supplier,
                category: record.category,
                description: record.description,
                bay: record.bay,
                sizes: record.sizes,
            },
            Self::Legacy(record) => Kit {
                id: new_id(),
                kit_number: record
                    .no
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| String::from("?")),
                supplier: record.sup.unwrap_or_default(),
                category: record.cat.unwrap_or_default(),
                description: record.desc.unwrap_or_default(),
                bay: record.bay.unwrap_or_default(),
                sizes: record.size.unwrap_or_default(),
            },
        }
    }
}

impl From<Kit> for KitRecord {
    fn from(kit: Kit) -> Self {
        Self::Standard(StandardKitRecord {
            id: Some(kit.id),
            kit_number: kit.kit_number,
            supplier: kit.supplier,
            category: kit.category,
            description: kit.description,
            bay: kit.bay,
            sizes: kit.sizes,
        })
    }
}
