//! # `errtype`
//!
//! Command-line companion for the `errtype` library: validates an error
//! catalog, lists the types it defines, and renders sample instances so the
//! text, JSON and diagnostic forms can be checked before they reach logs or
//! clients.
//!
//! ## Usage
//!
//! ```sh
//! errtype --catalog errtype.yaml --list
//! errtype --catalog errtype.yaml --code mystuff/namespaced --meta user=alice --format json
//! ```
//!
//! See `errtype --help` for more options.

use anyhow::Result;
use clap::Parser as _;
use errtype::cli::Args;
use errtype::error::ErrtypeError;
use errtype::system::real::RealSystem;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber based on verbose flag
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_target(false).with_env_filter(filter).init();

    match errtype::run(&args, Arc::new(RealSystem::new())) {
        Ok(output) => {
            // Output to stdout (not using logging)
            println!("{}", output.trim_end());
            std::process::exit(0);
        }
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<ErrtypeError>()
                    .map_or(1, ErrtypeError::exit_code),
            );
        }
    }
}
