// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::cell::RefCell;

use kitloan_audit::{Actor, Cause};
use kitloan_domain::{BookingId, Kit, KitId, LifecycleAction};
use kitloan_persistence::{Repository, SqliteRepository};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    ApiError, ApiResult, BookingNotice, CreateBookingRequest, CreateBookingResponse, Notifier,
    RegisterConfig, create_booking,
};

/// Collects every notice so tests can inspect what was announced.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notices: RefCell<Vec<BookingNotice>>,
}

impl RecordingNotifier {
    pub fn actions(&self) -> Vec<LifecycleAction> {
        self.notices
            .borrow()
            .iter()
            .map(|notice| notice.action_type)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &BookingNotice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("front-desk"), String::from("staff"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("Counter request"))
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-02-20 09:00 UTC)
}

/// A fresh in-memory register holding three kits: `k1` tees, `k2` polos
/// and `k3` hoodies.
pub fn create_test_repo() -> SqliteRepository {
    let mut repo: SqliteRepository = SqliteRepository::new_in_memory().unwrap();
    for kit in [
        Kit::new(
            KitId::new("k1"),
            "001",
            "AS COLOUR",
            "Tees",
            "Staple tee",
            "BAY 1",
            "XS-3XL",
        ),
        Kit::new(
            KitId::new("k2"),
            "002",
            "BIZ",
            "Polos",
            "Crew polo",
            "BAY 1",
            "S-5XL",
        ),
        Kit::new(
            KitId::new("k3"),
            "003",
            "RAMO",
            "Hoodies",
            "Pullover hoodie",
            "BAY 2",
            "S-3XL",
        ),
    ] {
        repo.create_kit(&kit).unwrap();
    }
    repo
}

pub fn create_booking_request(
    booking_type: &str,
    kit_ids: &[&str],
    date_out: &str,
    date_return: &str,
) -> CreateBookingRequest {
    CreateBookingRequest {
        booking_type: booking_type.to_string(),
        date_out: Some(date_out.to_string()),
        date_return: Some(date_return.to_string()),
        sales_person: String::from("Jo"),
        organization: String::from("Acme"),
        contact_name: String::from("Sam"),
        email: String::from("sam@acme.test"),
        phone: String::from("0400 000 000"),
        kit_ids: kit_ids.iter().map(ToString::to_string).collect(),
        extra_samples: String::new(),
        notes: String::new(),
    }
}

pub fn submit_booking(
    repo: &mut SqliteRepository,
    notifier: &RecordingNotifier,
    config: &RegisterConfig,
    request: CreateBookingRequest,
) -> Result<ApiResult<CreateBookingResponse>, ApiError> {
    create_booking(
        repo,
        notifier,
        config,
        request,
        create_test_actor(),
        create_test_cause(),
        create_test_now(),
    )
}

/// Records a booking under the default configuration and returns its id.
pub fn book(
    repo: &mut SqliteRepository,
    booking_type: &str,
    kit_ids: &[&str],
    date_out: &str,
    date_return: &str,
) -> BookingId {
    let notifier: RecordingNotifier = RecordingNotifier::default();
    submit_booking(
        repo,
        &notifier,
        &RegisterConfig::default(),
        create_booking_request(booking_type, kit_ids, date_out, date_return),
    )
    .unwrap()
    .response
    .booking
    .id
}
