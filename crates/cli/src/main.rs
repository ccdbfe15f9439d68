// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `kitloan`: front desk command line for the kit loan register.
//!
//! Every command prints its result as JSON on stdout. Logs go to stderr.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod store;

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::Result;
use kitloan_api::{AvailabilityPolicy, RegisterConfig, TracingNotifier};
use kitloan_audit::Actor;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, Session};
use crate::store::RegisterStore;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(args.log_level().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to the `SQLite` register database
    #[arg(short, long, global = true, default_value = "kitloan.db")]
    database: PathBuf,

    /// Directory holding the local JSON copy of the register
    #[arg(long, global = true, default_value = "kitloan-cache")]
    cache_dir: PathBuf,

    /// Consecutive database failures before the local copy is used directly
    #[arg(long, global = true, default_value_t = kitloan_persistence::DEFAULT_TRIP_AFTER)]
    trip_after: u32,

    /// What to do when a booking selects kits that are already out
    #[arg(long, global = true, default_value_t = AvailabilityPolicy::Advisory)]
    policy: AvailabilityPolicy,

    /// Staff allowed to take bookings (repeatable). Anyone when omitted.
    #[arg(long = "roster", global = true)]
    roster: Vec<String>,

    /// Operator name recorded in the audit trail
    #[arg(long, global = true, default_value = "front-desk")]
    operator: String,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        let mut store: RegisterStore =
            RegisterStore::open(&self.database, &self.cache_dir, self.trip_after)?;
        let session: Session<TracingNotifier> = Session {
            config: RegisterConfig::new(self.policy, self.roster),
            actor: Actor::new(self.operator, String::from("operator")),
            notifier: TracingNotifier,
        };

        let output: serde_json::Value = self.command.execute(store.repository(), &session)?;
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}
