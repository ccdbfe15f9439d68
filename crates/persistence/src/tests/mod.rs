// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod fallback_tests;
mod initialization_tests;

use kitloan_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot, Subject};
use kitloan_domain::{
    Booking, BookingId, BookingStatus, BookingType, CustomerDetails, Kit, KitId, SalesPerson,
};
use time::Date;
use time::macros::{date, datetime};

pub fn create_test_kit(id: &str, kit_number: &str) -> Kit {
    Kit::new(
        KitId::new(id),
        kit_number,
        "AS COLOUR",
        "Tees",
        "Staple tee",
        "BAY 1",
        "XS-3XL",
    )
}

pub fn create_test_booking(id: &str, status: BookingStatus, kit_ids: &[&str]) -> Booking {
    create_test_booking_dated(
        id,
        status,
        kit_ids,
        date!(2024 - 03 - 01),
        date!(2024 - 03 - 05),
    )
}

pub fn create_test_booking_dated(
    id: &str,
    status: BookingStatus,
    kit_ids: &[&str],
    date_out: Date,
    date_return: Date,
) -> Booking {
    Booking {
        id: BookingId::new(id),
        created_at: datetime!(2024-02-20 09:15:00 UTC),
        booking_type: BookingType::Collection,
        status,
        date_out,
        date_return,
        sales_person: SalesPerson::new("Jo").unwrap(),
        customer: CustomerDetails::new("Acme", "Sam", "sam@acme.test", "0400 000 000"),
        kit_ids: kit_ids.iter().map(|id| KitId::new(id)).collect(),
        extra_samples: String::from("1x navy polo"),
        notes: String::from("Ring before delivery"),
    }
}

pub fn create_test_audit_event(action: &str) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("test-actor"), String::from("staff")),
        Cause::new(String::from("test-cause"), String::from("Test operation")),
        Action::new(String::from(action), None),
        Subject::Booking(BookingId::new("b1")),
        StateSnapshot::new(String::from("kits=0,pending=0,active=0,returned=0")),
        StateSnapshot::new(String::from("kits=0,pending=1,active=0,returned=0")),
    )
}
