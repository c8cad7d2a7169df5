// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Jitm - just-in-time message selection.
//!
//! This is the binary entry point. It loads configuration and the message
//! catalog, opens the dismissal store, and dispatches to a subcommand.

mod catalog;
mod check;
mod report;
mod select;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use jitm_config::JitmConfig;
use jitm_core::JitmError;
use jitm_engine::{Catalog, JitmService, load_catalog_from_config};
use jitm_storage::SqliteDismissalStore;

/// Jitm - select and record just-in-time admin notices.
#[derive(Parser, Debug)]
#[command(name = "jitm", version, about, long_about = None)]
struct Cli {
    /// Load this configuration file instead of searching the standard locations.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the message to show for a context as JSON (`null` when none).
    Select(select::SelectArgs),
    /// Record that a user dismissed or accepted a message.
    Report(report::ReportArgs),
    /// List the loaded catalog in priority order.
    Catalog {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and catalog, then check the dismissal store.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => jitm_config::load_and_validate_path(path),
        None => jitm_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            jitm_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.engine.log_level);

    let catalog = match load_catalog_from_config(&config) {
        Ok(catalog) => catalog,
        Err(errors) => {
            jitm_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    tracing::debug!(messages = catalog.len(), "catalog ready");

    if let Err(e) = run(cli.command, &config, catalog).await {
        eprintln!("jitm: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &JitmConfig, catalog: Catalog) -> Result<(), JitmError> {
    let mut out = std::io::stdout();
    match command {
        Commands::Select(args) => {
            let service = open_service(config, catalog).await?;
            select::run_select(&service, &args, &mut out).await
        }
        Commands::Report(args) => {
            let service = open_service(config, catalog).await?;
            report::run_report(&service, &args, &mut out).await
        }
        Commands::Catalog { json } => catalog::run_catalog(&catalog, json, &mut out),
        Commands::Check => {
            let store = SqliteDismissalStore::open(config.storage.clone()).await?;
            let result = check::run_check(config, &catalog, &store, &mut out).await;
            store.close().await?;
            result
        }
    }
}

/// Wire the service over the configured SQLite store.
async fn open_service(config: &JitmConfig, catalog: Catalog) -> Result<JitmService, JitmError> {
    let store = SqliteDismissalStore::open(config.storage.clone()).await?;
    Ok(JitmService::from_config(config, catalog, Arc::new(store)))
}

/// Map write failures on the output stream into the crate error.
pub(crate) fn write_out(out: &mut impl Write, text: &str) -> Result<(), JitmError> {
    writeln!(out, "{text}").map_err(|e| JitmError::Internal(format!("cannot write output: {e}")))
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("jitm={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
