// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, State, TransitionResult, apply};
use kitloan_audit::{Actor, Cause};
use kitloan_domain::{BookingDraft, BookingId, BookingType, CustomerDetails, Kit, KitId};
use time::macros::{date, datetime};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("front-desk"), String::from("staff"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Counter booking"))
}

pub fn create_test_kit(id: &str, kit_number: &str) -> Kit {
    Kit::new(
        KitId::new(id),
        kit_number,
        "BIZ",
        "Hoodies",
        "Pullover hoodie",
        "BAY 2",
        "S-5XL",
    )
}

pub fn create_test_draft(booking_type: BookingType, kit_ids: &[&str]) -> BookingDraft {
    BookingDraft {
        booking_type,
        date_out: Some(date!(2024 - 03 - 01)),
        date_return: Some(date!(2024 - 03 - 05)),
        sales_person: String::from("Jo"),
        customer: CustomerDetails::new("Acme", "Sam", "sam@acme.test", ""),
        kit_ids: kit_ids.iter().map(|id| KitId::new(id)).collect(),
        extra_samples: String::new(),
        notes: String::new(),
    }
}

pub fn create_test_state() -> State {
    State::from_parts(
        vec![create_test_kit("k1", "001"), create_test_kit("k2", "002")],
        Vec::new(),
    )
}

pub fn create_booking_command(id: &str, draft: BookingDraft) -> Command {
    Command::CreateBooking {
        booking_id: BookingId::new(id),
        created_at: datetime!(2024-02-20 09:15 UTC),
        draft,
    }
}

/// Applies a command that the test expects to succeed and returns the new state.
pub fn apply_ok(state: &State, command: Command) -> State {
    let result: TransitionResult =
        apply(state, command, create_test_actor(), create_test_cause()).unwrap();
    result.new_state
}
