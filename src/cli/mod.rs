//! CLI module for covi-keys
//!
//! Provides subcommands for running the service:
//! - `serve`: run the HTTP API server (default)
//! - `migrate`: apply pending database migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// covi-keys - API key issuance and management service
#[derive(Parser)]
#[command(name = "covi-keys")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Apply pending database migrations and exit
    Migrate,
}
