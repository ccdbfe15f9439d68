// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::{Args, Subcommand};
use color_eyre::Result;
use kitloan_api::{
    AvailabilityRequest, CreateBookingRequest, KitRequest, Notifier, RegisterConfig,
    activate_booking, booking_board, check_availability, create_booking, create_kit, delete_kit,
    list_kits, return_booking, update_kit,
};
use kitloan_audit::{Actor, Cause};
use kitloan_domain::parse_iso_date;
use kitloan_persistence::Repository;
use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Settings shared by every command of one invocation.
pub struct Session<N> {
    pub config: RegisterConfig,
    pub actor: Actor,
    pub notifier: N,
}

impl<N> Session<N> {
    fn cause(&self, description: &str) -> Cause {
        Cause::new(Uuid::new_v4().to_string(), description.to_string())
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Show which kits are free between two dates
    #[command(visible_alias = "a")]
    Availability {
        /// First day out (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Day due back (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Only list kits matching this text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show kits out, upcoming pickups, history and overdue bookings
    Board {
        /// Date to judge overdue bookings against (defaults to today, UTC)
        #[arg(long)]
        today: Option<String>,
        /// Only show bookings matching this organization, contact, booking id or kit id
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Record a new booking
    Book(BookArgs),

    /// Mark a pending booking as collected
    Activate {
        /// Booking id
        booking_id: String,
    },

    /// Mark an active booking as returned
    Return {
        /// Booking id
        booking_id: String,
    },

    /// Manage the kit catalog
    #[command(subcommand)]
    Kits(KitsCommand),
}

#[derive(Clone, Debug, Args)]
pub struct BookArgs {
    /// IMMEDIATE, COLLECTION or DELIVERY
    #[arg(long = "type")]
    booking_type: String,
    /// First day out (YYYY-MM-DD); IMMEDIATE bookings default to today
    #[arg(long)]
    from: Option<String>,
    /// Day due back (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// Staff member taking the booking
    #[arg(long)]
    sales: String,
    #[arg(long, default_value = "")]
    organization: String,
    #[arg(long, default_value = "")]
    contact: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Kit id to include (repeatable)
    #[arg(long = "kit")]
    kits: Vec<String>,
    /// Loose samples going out with the booking
    #[arg(long, default_value = "")]
    samples: String,
    #[arg(long, default_value = "")]
    notes: String,
}

impl From<BookArgs> for CreateBookingRequest {
    fn from(args: BookArgs) -> Self {
        Self {
            booking_type: args.booking_type,
            date_out: args.from,
            date_return: args.to,
            sales_person: args.sales,
            organization: args.organization,
            contact_name: args.contact,
            email: args.email,
            phone: args.phone,
            kit_ids: args.kits,
            extra_samples: args.samples,
            notes: args.notes,
        }
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum KitsCommand {
    /// List the catalog
    List {
        /// Only list kits matching this text
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Add a kit
    Add(KitArgs),
    /// Replace a kit's details
    Update {
        /// Kit id
        kit_id: String,
        #[command(flatten)]
        kit: KitArgs,
    },
    /// Remove a kit
    Delete {
        /// Kit id
        kit_id: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct KitArgs {
    /// Number painted on the kit bag
    #[arg(long)]
    number: String,
    #[arg(long, default_value = "")]
    supplier: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Storage bay
    #[arg(long, default_value = "")]
    bay: String,
    /// Size range, e.g. XS-3XL
    #[arg(long, default_value = "")]
    sizes: String,
}

impl From<KitArgs> for KitRequest {
    fn from(args: KitArgs) -> Self {
        Self {
            kit_number: args.number,
            supplier: args.supplier,
            category: args.category,
            description: args.description,
            bay: args.bay,
            sizes: args.sizes,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

impl Command {
    /// Runs the command against `repo` and returns its JSON output.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation is rejected or the register
    /// cannot be read or written.
    pub fn execute<N: Notifier>(
        self,
        repo: &mut dyn Repository,
        session: &Session<N>,
    ) -> Result<serde_json::Value> {
        match self {
            Self::Availability { from, to, query } => to_json(&check_availability(
                repo,
                &AvailabilityRequest {
                    date_out: from,
                    date_return: to,
                    query,
                },
            )?),
            Self::Board { today, query } => {
                let today: Date = match today {
                    Some(value) => parse_iso_date(&value)?,
                    None => OffsetDateTime::now_utc().date(),
                };
                to_json(&booking_board(repo, today, query.as_deref())?)
            }
            Self::Book(args) => to_json(
                &create_booking(
                    repo,
                    &session.notifier,
                    &session.config,
                    args.into(),
                    session.actor.clone(),
                    session.cause("kitloan book"),
                    OffsetDateTime::now_utc(),
                )?
                .response,
            ),
            Self::Activate { booking_id } => to_json(
                &activate_booking(
                    repo,
                    &session.notifier,
                    &booking_id,
                    session.actor.clone(),
                    session.cause("kitloan activate"),
                )?
                .response,
            ),
            Self::Return { booking_id } => to_json(
                &return_booking(
                    repo,
                    &session.notifier,
                    &booking_id,
                    session.actor.clone(),
                    session.cause("kitloan return"),
                )?
                .response,
            ),
            Self::Kits(command) => command.execute(repo, session),
        }
    }
}

impl KitsCommand {
    fn execute<N: Notifier>(
        self,
        repo: &mut dyn Repository,
        session: &Session<N>,
    ) -> Result<serde_json::Value> {
        match self {
            Self::List { query } => to_json(&list_kits(repo, query.as_deref())?),
            Self::Add(kit) => to_json(
                &create_kit(
                    repo,
                    &kit.into(),
                    session.actor.clone(),
                    session.cause("kitloan kits add"),
                )?
                .response,
            ),
            Self::Update { kit_id, kit } => to_json(
                &update_kit(
                    repo,
                    &kit_id,
                    &kit.into(),
                    session.actor.clone(),
                    session.cause("kitloan kits update"),
                )?
                .response,
            ),
            Self::Delete { kit_id } => to_json(
                &delete_kit(
                    repo,
                    &kit_id,
                    session.actor.clone(),
                    session.cause("kitloan kits delete"),
                )?
                .response,
            ),
        }
    }
}
