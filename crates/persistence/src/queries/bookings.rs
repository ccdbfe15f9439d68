// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, warn};

use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use kitloan_domain::{
    Booking, BookingId, BookingStatus, BookingType, CustomerDetails, KitId, SalesPerson,
    parse_iso_date,
};

/// Diesel Queryable struct for booking rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
struct BookingRow {
    booking_id: String,
    created_at: String,
    booking_type: String,
    status: String,
    date_out: String,
    date_return: String,
    sales_person: String,
    organization: String,
    contact_name: String,
    email: String,
    phone: String,
    kit_ids_json: String,
    extra_samples: String,
    notes: String,
}

fn decode_error(field: &str, err: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::SerializationError(format!("{field}: {err}"))
}

fn decode_booking(row: BookingRow) -> Result<Booking, PersistenceError> {
    let created_at: OffsetDateTime = OffsetDateTime::parse(&row.created_at, &Rfc3339)
        .map_err(|e| decode_error("created_at", e))?;
    let booking_type: BookingType = row
        .booking_type
        .parse()
        .map_err(|e| decode_error("booking_type", e))?;
    let status: BookingStatus = row.status.parse().map_err(|e| decode_error("status", e))?;
    let kit_ids: Vec<KitId> =
        serde_json::from_str(&row.kit_ids_json).map_err(|e| decode_error("kit_ids_json", e))?;

    Ok(Booking {
        id: BookingId::new(&row.booking_id),
        created_at,
        booking_type,
        status,
        date_out: parse_iso_date(&row.date_out).map_err(|e| decode_error("date_out", e))?,
        date_return: parse_iso_date(&row.date_return)
            .map_err(|e| decode_error("date_return", e))?,
        sales_person: SalesPerson::new(&row.sales_person)
            .map_err(|e| decode_error("sales_person", e))?,
        customer: CustomerDetails {
            organization: row.organization,
            name: row.contact_name,
            email: row.email,
            phone: row.phone,
        },
        kit_ids,
        extra_samples: row.extra_samples,
        notes: row.notes,
    })
}

/// Lists every booking in insertion order.
///
/// Rows that cannot be decoded (bad dates, unknown status) are skipped
/// with a warning so one bad record does not hide the rest.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings(conn: &mut SqliteConnection) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .order(bookings::booking_seq.asc())
        .select(BookingRow::as_select())
        .load(conn)?;

    let total: usize = rows.len();
    let mut loaded: Vec<Booking> = Vec::with_capacity(total);
    for row in rows {
        let booking_id: String = row.booking_id.clone();
        match decode_booking(row) {
            Ok(booking) => loaded.push(booking),
            Err(e) => warn!(booking_id, error = %e, "Skipping undecodable booking row"),
        }
    }

    debug!(total, loaded = loaded.len(), "Loaded bookings");

    Ok(loaded)
}
