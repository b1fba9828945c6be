//! Rewards report construction.
//!
//! [`build_report`] validates the whole transaction set and produces one
//! [`CustomerReward`] per customer, in the order customers first appear.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::customer_reward::CustomerReward;
use crate::error::{RewardsError, RewardsResult};
use crate::points::Points;
use crate::transaction::Transaction;

/// Ordered per-customer reward summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RewardsReport {
    customers: Vec<CustomerReward>,
}

impl RewardsReport {
    pub fn new(customers: Vec<CustomerReward>) -> Self {
        Self { customers }
    }

    pub fn customers(&self) -> &[CustomerReward] {
        &self.customers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CustomerReward> {
        self.customers.iter()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Points across every customer.
    pub fn total_points(&self) -> Points {
        self.customers
            .iter()
            .fold(0, |sum: Points, c| sum.saturating_add(c.total_points))
    }

    /// Transactions across every customer.
    pub fn total_transactions(&self) -> usize {
        self.customers.iter().map(|c| c.transaction_count).sum()
    }

    pub fn find(&self, customer_id: &str) -> Option<&CustomerReward> {
        self.customers.iter().find(|c| c.customer_id == customer_id)
    }

    /// Reorder by total points, highest first. Ties keep their current order.
    pub fn sorted_by_total_points(mut self) -> Self {
        self.customers.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        self
    }

    pub fn into_customers(self) -> Vec<CustomerReward> {
        self.customers
    }
}

impl<'a> IntoIterator for &'a RewardsReport {
    type Item = &'a CustomerReward;
    type IntoIter = std::slice::Iter<'a, CustomerReward>;

    fn into_iter(self) -> Self::IntoIter {
        self.customers.iter()
    }
}

/// Reject the whole set if any transaction is invalid or an id repeats.
pub fn validate_transactions(transactions: &[Transaction]) -> RewardsResult<()> {
    let mut seen_ids = HashSet::with_capacity(transactions.len());
    for tx in transactions {
        tx.validate()?;
        if !seen_ids.insert(tx.id) {
            return Err(RewardsError::validation(
                tx.id.to_string(),
                "duplicate transaction id",
            ));
        }
    }
    Ok(())
}

/// Build the rewards report for a full transaction set.
///
/// Customers appear in the order their id is first seen in `transactions`.
/// Every call recomputes from scratch; an empty input yields an empty report.
pub fn build_report(transactions: &[Transaction]) -> RewardsResult<RewardsReport> {
    validate_transactions(transactions)?;

    let mut order: Vec<&str> = Vec::new();
    let mut by_customer: HashMap<&str, Vec<&Transaction>> = HashMap::new();
    for tx in transactions {
        by_customer
            .entry(tx.customer_id.as_str())
            .or_insert_with(|| {
                order.push(tx.customer_id.as_str());
                Vec::new()
            })
            .push(tx);
    }

    let customers: Vec<CustomerReward> = order
        .into_iter()
        .map(|customer_id| {
            let matching = by_customer.remove(customer_id).unwrap_or_default();
            CustomerReward::from_transactions(customer_id, &matching)
        })
        .collect();

    tracing::debug!(
        transactions = transactions.len(),
        customers = customers.len(),
        "built rewards report"
    );

    Ok(RewardsReport::new(customers))
}
