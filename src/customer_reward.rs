//! Per-customer reward aggregation.
//!
//! [`CustomerReward`] holds one customer's total points and transaction count
//! together with a [`MonthlyBucket`] for every calendar month they purchased in.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    CustomerId,
    month::{MonthKey, derive_month_key},
    points::{Points, calculate_points},
    transaction::Transaction,
};

/// Name reported for a customer with no transactions.
pub const UNKNOWN_CUSTOMER_NAME: &str = "Unknown";

/// Points and transaction count for one customer in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    /// Already the key of the enclosing map in serialized output.
    #[serde(skip)]
    pub month_key: MonthKey,
    pub month_label: String,
    pub points: Points,
    pub transaction_count: usize,
}

impl MonthlyBucket {
    fn new(month_key: MonthKey, month_label: String) -> Self {
        Self {
            month_key,
            month_label,
            points: 0,
            transaction_count: 0,
        }
    }
}

/// Group transactions by calendar month.
///
/// The caller is responsible for passing a single customer's transactions.
/// Buckets are created on first use and only ever added to.
pub fn aggregate_monthly<'a, I>(transactions: I) -> BTreeMap<MonthKey, MonthlyBucket>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: BTreeMap<MonthKey, MonthlyBucket> = BTreeMap::new();

    for tx in transactions {
        let (month_key, month_label) = derive_month_key(tx.transaction_date);
        let bucket = buckets
            .entry(month_key)
            .or_insert_with(|| MonthlyBucket::new(month_key, month_label));
        bucket.points = bucket.points.saturating_add(calculate_points(tx.amount));
        bucket.transaction_count += 1;
    }

    buckets
}

/// Reward summary for a single customer.
///
/// Maintains the invariants: `total_points` equals the sum of bucket points,
/// and `transaction_count` equals the sum of bucket transaction counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReward {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub total_points: Points,
    pub transaction_count: usize,
    /// Keyed by month; iteration is chronological.
    pub monthly_points: BTreeMap<MonthKey, MonthlyBucket>,
}

impl CustomerReward {
    /// Build a reward from transactions already filtered to `customer_id`.
    ///
    /// The name comes from the first transaction; later differing names are
    /// logged and otherwise ignored.
    pub(crate) fn from_transactions(customer_id: &str, transactions: &[&Transaction]) -> Self {
        let customer_name = match transactions.first() {
            Some(first) => {
                if let Some(other) = transactions
                    .iter()
                    .find(|tx| tx.customer_name != first.customer_name)
                {
                    tracing::warn!(
                        customer_id,
                        kept = %first.customer_name,
                        ignored = %other.customer_name,
                        "customer has transactions under more than one name"
                    );
                }
                first.customer_name.clone()
            }
            None => UNKNOWN_CUSTOMER_NAME.to_string(),
        };

        Self {
            customer_id: customer_id.to_string(),
            customer_name,
            total_points: transactions
                .iter()
                .fold(0, |sum: Points, tx| sum.saturating_add(calculate_points(tx.amount))),
            transaction_count: transactions.len(),
            monthly_points: aggregate_monthly(transactions.iter().copied()),
        }
    }

    /// Monthly buckets in chronological order.
    pub fn monthly_breakdown(&self) -> impl Iterator<Item = &MonthlyBucket> {
        self.monthly_points.values()
    }
}

/// Compute the reward summary for one customer out of the full transaction set.
///
/// A customer with no transactions gets the "Unknown" name and zero totals.
pub fn aggregate_customer(all_transactions: &[Transaction], customer_id: &str) -> CustomerReward {
    let matching: Vec<&Transaction> = all_transactions
        .iter()
        .filter(|tx| tx.customer_id == customer_id)
        .collect();
    CustomerReward::from_transactions(customer_id, &matching)
}
