//! Command-line interface for Roster

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Roster - user and role management service
#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (skips the usual search locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Print the user report
    Report {
        /// Filter: all, active or inactive
        #[arg(long, default_value = "all")]
        status: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all roles
    #[command(alias = "ls")]
    Roles,
}

pub use commands::*;
