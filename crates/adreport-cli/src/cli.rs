//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// adreport - Fetch paginated reports from the AdSense Management API
#[derive(Debug, Parser)]
#[command(name = "adreport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ADREPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all accounts the authorized user can access
    Accounts {
        /// Accounts requested per page
        #[arg(long)]
        page_size: Option<u64>,
    },

    /// Generate a report over a date range
    Report {
        /// Account resource name, e.g. accounts/pub-1234567890123456
        #[arg(long)]
        account: String,

        /// Start date (inclusive), e.g. 2024-01-01
        #[arg(long)]
        from: NaiveDate,

        /// End date (inclusive), e.g. 2024-01-31
        #[arg(long)]
        to: NaiveDate,

        /// Dimension to group by (can be repeated), e.g. DATE
        #[arg(long = "dimension", action = clap::ArgAction::Append)]
        dimensions: Vec<String>,

        /// Metric to report (can be repeated), e.g. CLICKS
        #[arg(long = "metric", action = clap::ArgAction::Append)]
        metrics: Vec<String>,

        /// Insert N/A rows for days/months with no data
        #[arg(long)]
        fill_gaps: bool,

        /// Rows requested per page
        #[arg(long)]
        page_size: Option<u64>,

        /// Hard cap on total rows fetched
        #[arg(long)]
        row_limit: Option<u64>,
    },

    /// Manage the cached OAuth credential
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Inspect or validate the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Credential management actions.
#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Store a refresh token obtained out of band
    Import {
        /// The OAuth refresh token
        #[arg(long)]
        refresh_token: String,

        /// Granted scope (can be repeated)
        #[arg(long = "scope", action = clap::ArgAction::Append)]
        scopes: Vec<String>,
    },
    /// Show whether a credential is cached and for which scopes
    Status,
    /// Remove the cached credential
    Clear,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective configuration
    Dump,
    /// Validate the configuration
    Validate,
    /// Show the configuration file path
    Path,
}
