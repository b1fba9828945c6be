//! Transaction data sources.
//!
//! The report builder only needs a fully materialized transaction list; a
//! [`TransactionSource`] supplies it. Fetches are plain futures, so a caller
//! cancels one by dropping it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{RewardsError, RewardsResult};
use crate::transaction::{RawTransaction, Transaction};

/// Anything that can supply the full transaction list.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch every transaction, validated.
    ///
    /// Transport failures are reported as [`RewardsError::SourceUnavailable`];
    /// malformed records as [`RewardsError::Validation`].
    async fn fetch_transactions(&self) -> RewardsResult<Vec<Transaction>>;
}

/// Pick a file source by extension: `.json` is JSON, anything else CSV.
pub fn source_for_path<P: AsRef<Path>>(path: P) -> Box<dyn TransactionSource> {
    let path = path.as_ref().to_path_buf();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Box::new(JsonFileSource::new(path))
    } else {
        Box::new(CsvFileSource::new(path))
    }
}

/// Reads transactions from a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn read_blocking(path: &Path) -> RewardsResult<Vec<Transaction>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(|e| {
                tracing::error!("Failed to open {}: {}", path.display(), e);
                RewardsError::source_unavailable(format!("{}: {}", path.display(), e))
            })?;

        let mut transactions = Vec::new();
        for (index, result) in reader.deserialize::<RawTransaction>().enumerate() {
            let position = index + 1;
            let raw = result.map_err(|e| {
                if e.is_io_error() {
                    RewardsError::source_unavailable(format!("{}: {}", path.display(), e))
                } else {
                    RewardsError::validation(format!("at record {}", position), e.to_string())
                }
            })?;
            transactions.push(raw.into_transaction(position)?);
        }
        Ok(transactions)
    }
}

#[async_trait]
impl TransactionSource for CsvFileSource {
    async fn fetch_transactions(&self) -> RewardsResult<Vec<Transaction>> {
        let path = self.path.clone();
        let transactions = tokio::task::spawn_blocking(move || Self::read_blocking(&path))
            .await
            .map_err(RewardsError::source_unavailable)??;
        tracing::debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "loaded CSV transactions"
        );
        Ok(transactions)
    }
}

/// JSON record shape: camelCase keys, `id` and `amount` as numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonTransaction {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    customer_id: Value,
    #[serde(default)]
    customer_name: Value,
    #[serde(default)]
    transaction_date: Value,
    #[serde(default)]
    amount: Value,
    #[serde(default)]
    description: Value,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl From<JsonTransaction> for RawTransaction {
    fn from(record: JsonTransaction) -> Self {
        Self {
            id: scalar_text(record.id),
            customer_id: scalar_text(record.customer_id),
            customer_name: scalar_text(record.customer_name),
            transaction_date: scalar_text(record.transaction_date),
            amount: scalar_text(record.amount),
            description: scalar_text(record.description),
        }
    }
}

/// Reads transactions from a JSON array of transaction objects.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

/// Decode a JSON array of transactions.
pub fn parse_json_transactions(bytes: &[u8]) -> RewardsResult<Vec<Transaction>> {
    let records: Vec<JsonTransaction> =
        serde_json::from_slice(bytes).map_err(RewardsError::source_unavailable)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| RawTransaction::from(record).into_transaction(index + 1))
        .collect()
}

#[async_trait]
impl TransactionSource for JsonFileSource {
    async fn fetch_transactions(&self) -> RewardsResult<Vec<Transaction>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!("Failed to read {}: {}", self.path.display(), e);
            RewardsError::source_unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let transactions = parse_json_transactions(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "loaded JSON transactions"
        );
        Ok(transactions)
    }
}

/// Serves a fixed, already validated list.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    transactions: Vec<Transaction>,
}

impl InMemorySource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

#[async_trait]
impl TransactionSource for InMemorySource {
    async fn fetch_transactions(&self) -> RewardsResult<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }
}
