//! Prenotification decision checker binary
//!
//! # Usage
//!
//! ```bash
//! pnf-check decide --last-filing 2022-08-01 --claim-start 2022-01-01 --claim-end 2022-12-31
//! pnf-check --json relevance --filing-date 2024-03-01
//! pnf-check walkthrough answers.json
//! ```
//!
//! # Environment Variables
//!
//! * `PNF_CUTOVER_DATE` - Legal cutover date (default: 2023-04-01)
//! * `PNF_NOTIFICATION_EXTENSION_MONTHS` - Notification window extension (default: 6)
//! * `PNF_RELEVANCE_LOOKBACK_YEARS` - Relevance lookback (default: 3)
//! * `PNF_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: warn)

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_cli::{run, Cli, CliConfig};

fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env().context("Failed to load PNF_* configuration")?;

    init_tracing(&config.log_level);

    let output = run(cli, &config)?;
    println!("{}", output);
    Ok(())
}

/// Initializes the tracing subscriber, logging to stderr so stdout stays parseable
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
