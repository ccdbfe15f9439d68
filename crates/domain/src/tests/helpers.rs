// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Booking, BookingDraft, BookingId, BookingStatus, BookingType, CustomerDetails, Kit, KitId,
    SalesPerson,
};
use time::Date;
use time::macros::{date, datetime};

pub fn create_test_kit(id: &str, kit_number: &str) -> Kit {
    Kit::new(
        KitId::new(id),
        kit_number,
        "MAXAM",
        "Polo shirts",
        "Mixed sub polo set",
        "BAY 4",
        "8-16 / XS-2XL",
    )
}

pub fn create_test_booking(
    id: &str,
    status: BookingStatus,
    date_out: Date,
    date_return: Date,
) -> Booking {
    Booking {
        id: BookingId::new(id),
        created_at: datetime!(2024-01-01 08:30 UTC),
        booking_type: BookingType::Delivery,
        status,
        date_out,
        date_return,
        sales_person: SalesPerson::new("Front Desk").unwrap(),
        customer: CustomerDetails::new("Acme", "Sam", "sam@acme.test", "0400 000 000"),
        kit_ids: vec![KitId::new("k1")],
        extra_samples: String::new(),
        notes: String::new(),
    }
}

pub fn create_valid_draft() -> BookingDraft {
    BookingDraft {
        booking_type: BookingType::Collection,
        date_out: Some(date!(2024 - 03 - 01)),
        date_return: Some(date!(2024 - 03 - 05)),
        sales_person: String::from("Front Desk"),
        customer: CustomerDetails::new("Acme", "Sam", "sam@acme.test", "0400 000 000"),
        kit_ids: vec![KitId::new("k1")],
        extra_samples: String::new(),
        notes: String::new(),
    }
}
