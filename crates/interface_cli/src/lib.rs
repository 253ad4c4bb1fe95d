//! Prenotification decision command line interface
//!
//! This crate is the interaction surface around the decision engine: it
//! parses ISO dates from arguments, loads configuration from the environment,
//! and renders results as text or JSON. All decisions are delegated to
//! `domain_pnf`.

pub mod cli;
pub mod config;
pub mod commands;

pub use cli::{Cli, Commands};
pub use config::CliConfig;
pub use commands::run;
