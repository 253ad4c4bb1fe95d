use clap::{Parser, Subcommand};
use std::path::PathBuf;

use core_kernel::CalendarDate;

#[derive(Parser, Debug)]
#[command(name = "pnf-check", version, about = "Checks whether a prenotification form is needed before claiming")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Override the legal cutover date (YYYY-MM-DD)")]
    pub cutover: Option<CalendarDate>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the decision rules for one claim
    Decide {
        #[arg(long)]
        last_filing: CalendarDate,
        #[arg(long)]
        claim_start: CalendarDate,
        #[arg(long)]
        claim_end: CalendarDate,
    },
    /// Check whether an earlier filing still matters
    Relevance {
        #[arg(long)]
        filing_date: CalendarDate,
        #[arg(long, help = "Defaults to the current UTC date")]
        today: Option<CalendarDate>,
    },
    /// Replay a JSON array of answers through the question flow
    Walkthrough {
        answers: PathBuf,
    },
}
