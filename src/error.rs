//! Error types for the rewards engine.

use thiserror::Error;

use crate::{CustomerId, TransactionId};

/// Result type for rewards operations.
pub type RewardsResult<T> = Result<T, RewardsError>;

#[derive(Error, Debug)]
pub enum RewardsError {
    /// A transaction could not be accepted as input.
    ///
    /// `transaction_id` is the raw id as read, or the record position when no
    /// id was readable.
    #[error("invalid transaction {transaction_id}: {reason}")]
    Validation {
        transaction_id: String,
        reason: String,
    },

    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error("transaction {0} not found")]
    TransactionNotFound(TransactionId),

    /// The data source could not supply transactions.
    #[error("transaction source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RewardsError {
    pub fn validation(transaction_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            transaction_id: transaction_id.into(),
            reason: reason.into(),
        }
    }

    pub fn source_unavailable<E: std::fmt::Display>(err: E) -> Self {
        Self::SourceUnavailable(err.to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CustomerNotFound(_) | Self::TransactionNotFound(_))
    }
}
