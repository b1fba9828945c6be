//! Command-line configuration.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::CustomerId;

/// How the report is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One CSV row per customer.
    #[default]
    Summary,
    /// One CSV row per customer and month.
    Monthly,
    /// The full report as JSON.
    Json,
}

/// Order of customers in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Order in which customers first appear in the input.
    #[default]
    FirstSeen,
    /// Highest total points first.
    Points,
}

/// Compute loyalty reward points from a transaction file.
#[derive(Debug, Clone, Parser)]
#[command(name = "rewards-points", version, about)]
pub struct Config {
    /// Transaction file (.csv or .json)
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Report only this customer
    #[arg(short, long)]
    pub customer: Option<CustomerId>,

    /// Customer ordering
    #[arg(short, long, value_enum, default_value_t = SortOrder::FirstSeen)]
    pub sort: SortOrder,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Defaults for `input`, as if given alone on the command line.
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            input: input.into(),
            format: OutputFormat::default(),
            customer: None,
            sort: SortOrder::default(),
            verbose: 0,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_customer(mut self, customer: impl Into<CustomerId>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Log filter directive for the configured verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
