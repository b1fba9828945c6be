//! Async facade over a [`TransactionSource`] and the report builder.
//!
//! Every call fetches and recomputes from scratch; nothing is cached and
//! nothing is retried.

use crate::customer_reward::CustomerReward;
use crate::error::{RewardsError, RewardsResult};
use crate::report::{RewardsReport, build_report};
use crate::source::TransactionSource;
use crate::transaction::Transaction;
use crate::TransactionId;

/// Rewards queries backed by a transaction source.
pub struct RewardsService {
    source: Box<dyn TransactionSource>,
}

impl RewardsService {
    pub fn new<S: TransactionSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    pub fn from_boxed(source: Box<dyn TransactionSource>) -> Self {
        Self { source }
    }

    /// All transactions from the source.
    pub async fn fetch_transactions(&self) -> RewardsResult<Vec<Transaction>> {
        self.source.fetch_transactions().await
    }

    /// Rewards for every customer, in first-appearance order.
    pub async fn fetch_customer_rewards(&self) -> RewardsResult<RewardsReport> {
        let transactions = self.fetch_transactions().await?;
        build_report(&transactions)
    }

    /// Rewards for one customer.
    pub async fn fetch_customer_rewards_by_id(
        &self,
        customer_id: &str,
    ) -> RewardsResult<CustomerReward> {
        self.fetch_customer_rewards()
            .await?
            .into_customers()
            .into_iter()
            .find(|reward| reward.customer_id == customer_id)
            .ok_or_else(|| RewardsError::CustomerNotFound(customer_id.to_string()))
    }

    /// A single transaction by id.
    pub async fn fetch_transaction_by_id(
        &self,
        transaction_id: TransactionId,
    ) -> RewardsResult<Transaction> {
        self.fetch_transactions()
            .await?
            .into_iter()
            .find(|tx| tx.id == transaction_id)
            .ok_or(RewardsError::TransactionNotFound(transaction_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Decimal;
    use crate::source::InMemorySource;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct UnavailableSource;

    #[async_trait]
    impl TransactionSource for UnavailableSource {
        async fn fetch_transactions(&self) -> RewardsResult<Vec<Transaction>> {
            Err(RewardsError::source_unavailable("upstream timed out"))
        }
    }

    fn purchase(id: TransactionId, customer: &str, name: &str, amount: f64) -> Transaction {
        Transaction {
            id,
            customer_id: customer.to_string(),
            customer_name: name.to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
            amount: Decimal::from_f64(amount),
            description: format!("purchase {}", id),
        }
    }

    fn service() -> RewardsService {
        RewardsService::new(InMemorySource::new(vec![
            purchase(25, "CUST005", "Robert Martinez", 250.0),
            purchase(28, "CUST006", "Lisa Anderson", 50.0),
            purchase(29, "CUST006", "Lisa Anderson", 100.0),
        ]))
    }

    #[tokio::test]
    async fn test_fetch_transactions() {
        assert_eq!(service().fetch_transactions().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_customer_rewards() {
        let report = service().fetch_customer_rewards().await.unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report.customers()[0].customer_id, "CUST005");
        assert_eq!(report.customers()[0].total_points, 350);
        assert_eq!(report.customers()[1].total_points, 50);
    }

    #[tokio::test]
    async fn test_fetch_customer_rewards_recomputes() {
        let service = service();
        let first = service.fetch_customer_rewards().await.unwrap();
        let second = service.fetch_customer_rewards().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_customer_rewards_by_id() {
        let reward = service()
            .fetch_customer_rewards_by_id("CUST006")
            .await
            .unwrap();
        assert_eq!(reward.customer_name, "Lisa Anderson");
        assert_eq!(reward.transaction_count, 2);
    }

    #[tokio::test]
    async fn test_fetch_customer_rewards_by_id_not_found() {
        let err = service()
            .fetch_customer_rewards_by_id("CUST999")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "customer CUST999 not found");
    }

    #[tokio::test]
    async fn test_fetch_transaction_by_id() {
        let tx = service().fetch_transaction_by_id(29).await.unwrap();
        assert_eq!(tx.amount, Decimal::from_whole(100));
        let err = service().fetch_transaction_by_id(404).await.unwrap_err();
        assert!(matches!(err, RewardsError::TransactionNotFound(404)));
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let service = RewardsService::new(UnavailableSource);
        let err = service.fetch_customer_rewards().await.unwrap_err();
        assert!(matches!(err, RewardsError::SourceUnavailable(_)));
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn test_invalid_transaction_fails_report() {
        let service = RewardsService::new(InMemorySource::new(vec![
            purchase(1, "CUST001", "John Smith", 120.0),
            purchase(2, "CUST001", "John Smith", -3.0),
        ]));
        let err = service.fetch_customer_rewards().await.unwrap_err();
        assert!(err.is_validation());
    }
}
