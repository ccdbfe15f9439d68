// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle notifications.
//!
//! Notifications are fire-and-forget: a notifier cannot fail the
//! operation that triggered it.

use kitloan_domain::{Booking, Kit, LifecycleAction, resolve_kits};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Everything a downstream consumer needs to describe a booking event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingNotice {
    pub action_type: LifecycleAction,
    pub booking_id: String,
    pub booking_type: String,
    pub date_out: String,
    pub date_return: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_org: String,
    pub customer_phone: String,
    pub sales_person: String,
    pub notes: String,
    /// One line per kit still in the catalog: `category: description (sizes)`.
    pub kits_list: Vec<String>,
    pub other_samples: String,
}

impl BookingNotice {
    /// Builds a notice for a booking, resolving its kit references.
    ///
    /// Kits missing from the catalog are left out of `kits_list`.
    #[must_use]
    pub fn new(action_type: LifecycleAction, booking: &Booking, kits: &[Kit]) -> Self {
        let kits_list: Vec<String> = resolve_kits(&booking.kit_ids, kits)
            .into_iter()
            .map(|kit| format!("{}: {} ({})", kit.category, kit.description, kit.sizes))
            .collect();

        Self {
            action_type,
            booking_id: booking.id.to_string(),
            booking_type: booking.booking_type.to_string(),
            date_out: booking.date_out.to_string(),
            date_return: booking.date_return.to_string(),
            customer_name: booking.customer.name.clone(),
            customer_email: booking.customer.email.clone(),
            customer_org: booking.customer.organization.clone(),
            customer_phone: booking.customer.phone.clone(),
            sales_person: booking.sales_person.name().to_string(),
            notes: booking.notes.clone(),
            kits_list,
            other_samples: booking.extra_samples.clone(),
        }
    }
}

/// Receives booking lifecycle notices.
pub trait Notifier {
    /// Delivers a notice. Must not panic; failures are the notifier's own concern.
    fn notify(&self, notice: &BookingNotice);
}

/// Writes notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &BookingNotice) {
        info!(
            action = notice.action_type.as_str(),
            booking_id = %notice.booking_id,
            organization = %notice.customer_org,
            date_out = %notice.date_out,
            date_return = %notice.date_return,
            kits = notice.kits_list.len(),
            "Booking notice"
        );

        match serde_json::to_string(notice) {
            Ok(payload) => debug!(%payload, "Booking notice payload"),
            Err(e) => warn!(error = %e, "Failed to serialize booking notice"),
        }
    }
}
