// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use kitloan_domain::{Booking, BookingId, BookingStatus};

/// Inserts a new booking.
///
/// Dates are stored as `YYYY-MM-DD` text and the kit references as a JSON
/// array, matching the JSON cache layout.
///
/// # Errors
///
/// Returns `Duplicate` if the booking id already exists.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<(), PersistenceError> {
    let created_at: String = booking
        .created_at
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let kit_ids_json: String = serde_json::to_string(&booking.kit_ids)?;

    diesel::insert_into(bookings::table)
        .values((
            bookings::booking_id.eq(booking.id.value()),
            bookings::created_at.eq(&created_at),
            bookings::booking_type.eq(booking.booking_type.as_str()),
            bookings::status.eq(booking.status.as_str()),
            bookings::date_out.eq(booking.date_out.to_string()),
            bookings::date_return.eq(booking.date_return.to_string()),
            bookings::sales_person.eq(booking.sales_person.name()),
            bookings::organization.eq(&booking.customer.organization),
            bookings::contact_name.eq(&booking.customer.name),
            bookings::email.eq(&booking.customer.email),
            bookings::phone.eq(&booking.customer.phone),
            bookings::kit_ids_json.eq(&kit_ids_json),
            bookings::extra_samples.eq(&booking.extra_samples),
            bookings::notes.eq(&booking.notes),
        ))
        .execute(conn)?;

    info!(
        booking_id = %booking.id,
        status = %booking.status,
        kits = booking.kit_ids.len(),
        "Created booking"
    );
    Ok(())
}

/// Updates only the status column of one booking.
///
/// # Errors
///
/// Returns `BookingNotFound` if no row matched.
pub fn update_booking_status(
    conn: &mut SqliteConnection,
    booking_id: &BookingId,
    status: BookingStatus,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(bookings::table)
        .filter(bookings::booking_id.eq(booking_id.value()))
        .set(bookings::status.eq(status.as_str()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::BookingNotFound(booking_id.to_string()));
    }

    info!(%booking_id, %status, "Updated booking status");
    Ok(())
}
