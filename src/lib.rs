//! Loyalty reward points from purchase transactions.
//!
//! Each transaction earns points under a tiered rule: nothing for the first
//! $50, one point per dollar between $50 and $100, and two points per dollar
//! above $100. Points are summed per customer and broken down by calendar
//! month.
//!
//! # Example
//!
//! ```no_run
//! use std::io::stdout;
//!
//! use rewards_points::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     rewards_points::run(&Config::new("transactions.csv"), stdout()).await?;
//!     Ok(())
//! }
//! ```

use std::io::Write;

mod config;
mod customer_reward;
mod decimal;
mod error;
pub mod logging;
mod month;
mod output;
mod points;
mod report;
mod service;
mod source;
mod transaction;

pub use config::{Config, OutputFormat, SortOrder};
pub use customer_reward::{
    CustomerReward, MonthlyBucket, UNKNOWN_CUSTOMER_NAME, aggregate_customer, aggregate_monthly,
};
pub use decimal::{Decimal, ParseDecimalError};
pub use error::{RewardsError, RewardsResult};
pub use month::{MonthKey, derive_month_key};
pub use output::write_report;
pub use points::{Points, calculate_points};
pub use report::{RewardsReport, build_report, validate_transactions};
pub use service::RewardsService;
pub use source::{
    CsvFileSource, InMemorySource, JsonFileSource, TransactionSource, parse_json_transactions,
    source_for_path,
};
pub use transaction::{RawTransaction, Transaction};

/// Type aliases for clarity.
pub type TransactionId = u32;
pub type CustomerId = String;

/// Load the configured transaction file, compute rewards and write the report.
///
/// # Returns
/// * `Ok(())` on success
/// * `Err` if the file cannot be read, a transaction is invalid, the requested
///   customer is absent, or writing fails
pub async fn run<W: Write>(config: &Config, writer: W) -> RewardsResult<()> {
    let service = RewardsService::from_boxed(source_for_path(&config.input));

    let report = match &config.customer {
        Some(customer_id) => {
            RewardsReport::new(vec![service.fetch_customer_rewards_by_id(customer_id).await?])
        }
        None => service.fetch_customer_rewards().await?,
    };

    let report = match config.sort {
        SortOrder::FirstSeen => report,
        SortOrder::Points => report.sorted_by_total_points(),
    };

    write_report(&report, config.format, writer)
}
