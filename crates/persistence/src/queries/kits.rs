// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::kits;
use crate::error::PersistenceError;
use kitloan_domain::{Kit, KitId};

/// Diesel Queryable struct for kit rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = kits)]
struct KitRow {
    kit_id: String,
    kit_number: String,
    supplier: String,
    category: String,
    description: String,
    bay: String,
    sizes: String,
}

impl From<KitRow> for Kit {
    fn from(row: KitRow) -> Self {
        Self {
            id: KitId::new(&row.kit_id),
            kit_number: row.kit_number,
            supplier: row.supplier,
            category: row.category,
            description: row.description,
            bay: row.bay,
            sizes: row.sizes,
        }
    }
}

/// Lists the kit catalog in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_kits(conn: &mut SqliteConnection) -> Result<Vec<Kit>, PersistenceError> {
    let rows: Vec<KitRow> = kits::table
        .order(kits::kit_seq.asc())
        .select(KitRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded kits");

    Ok(rows.into_iter().map(Kit::from).collect())
}

/// Returns whether a kit with the given id exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn kit_exists(conn: &mut SqliteConnection, kit_id: &KitId) -> Result<bool, PersistenceError> {
    let count: i64 = kits::table
        .filter(kits::kit_id.eq(kit_id.value()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
