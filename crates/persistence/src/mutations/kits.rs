// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::kits;
use crate::error::PersistenceError;
use kitloan_domain::{Kit, KitId};

/// Inserts a new kit.
///
/// # Errors
///
/// Returns `Duplicate` if the kit id already exists.
pub fn insert_kit(conn: &mut SqliteConnection, kit: &Kit) -> Result<(), PersistenceError> {
    diesel::insert_into(kits::table)
        .values((
            kits::kit_id.eq(kit.id.value()),
            kits::kit_number.eq(&kit.kit_number),
            kits::supplier.eq(&kit.supplier),
            kits::category.eq(&kit.category),
            kits::description.eq(&kit.description),
            kits::bay.eq(&kit.bay),
            kits::sizes.eq(&kit.sizes),
        ))
        .execute(conn)?;

    info!(kit_id = %kit.id, kit_number = %kit.kit_number, "Created kit");
    Ok(())
}

/// Overwrites every field of a kit except its id.
///
/// # Errors
///
/// Returns `KitNotFound` if no row matched.
pub fn update_kit(conn: &mut SqliteConnection, kit: &Kit) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(kits::table)
        .filter(kits::kit_id.eq(kit.id.value()))
        .set((
            kits::kit_number.eq(&kit.kit_number),
            kits::supplier.eq(&kit.supplier),
            kits::category.eq(&kit.category),
            kits::description.eq(&kit.description),
            kits::bay.eq(&kit.bay),
            kits::sizes.eq(&kit.sizes),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::KitNotFound(kit.id.to_string()));
    }

    info!(kit_id = %kit.id, "Updated kit");
    Ok(())
}

/// Deletes a kit. Bookings referencing it are not touched.
///
/// # Errors
///
/// Returns `KitNotFound` if no row matched.
pub fn delete_kit(conn: &mut SqliteConnection, kit_id: &KitId) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(kits::table)
        .filter(kits::kit_id.eq(kit_id.value()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::KitNotFound(kit_id.to_string()));
    }

    info!(%kit_id, "Deleted kit");
    Ok(())
}
