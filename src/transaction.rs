//! Transaction types for the rewards engine.
//!
//! Defines the validated [`Transaction`] record and [`RawTransaction`], the
//! untyped shape read from CSV or JSON input before validation.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{CustomerId, TransactionId, decimal::Decimal, error::RewardsError};

/// Format accepted for `transaction_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single purchase attributable to one customer.
///
/// Amounts are non-negative once a record has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub transaction_date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
}

impl Transaction {
    /// Checks the invariants that typed construction cannot enforce.
    pub fn validate(&self) -> Result<(), RewardsError> {
        if self.amount.is_negative() {
            return Err(RewardsError::validation(
                self.id.to_string(),
                format!("negative amount {}", self.amount),
            ));
        }
        if self.customer_id.trim().is_empty() {
            return Err(RewardsError::validation(
                self.id.to_string(),
                "missing customer id",
            ));
        }
        Ok(())
    }
}

/// Transaction record as read from input, before validation.
///
/// Every field is optional so that a missing column is reported against the
/// transaction it belongs to rather than as an undecodable row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RawTransaction {
    /// Label used in errors: the raw id, or the record position if absent.
    fn label(&self, position: usize) -> String {
        match non_empty(&self.id) {
            Some(id) => id.to_string(),
            None => format!("at record {}", position),
        }
    }

    /// Validate and convert into a [`Transaction`].
    ///
    /// `position` is the 1-based record number, used to name records that
    /// lack a readable id.
    pub fn into_transaction(self, position: usize) -> Result<Transaction, RewardsError> {
        let label = self.label(position);
        let invalid = |reason: String| RewardsError::validation(label.clone(), reason);

        let id = non_empty(&self.id)
            .ok_or_else(|| invalid("missing transaction id".to_string()))?
            .parse::<TransactionId>()
            .map_err(|e| invalid(format!("unparseable transaction id: {}", e)))?;

        let customer_id = non_empty(&self.customer_id)
            .ok_or_else(|| invalid("missing customer id".to_string()))?
            .to_string();

        let date_str =
            non_empty(&self.transaction_date).ok_or_else(|| invalid("missing date".to_string()))?;
        let transaction_date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
            .map_err(|e| invalid(format!("unparseable date '{}': {}", date_str, e)))?;

        let amount = non_empty(&self.amount)
            .ok_or_else(|| invalid("missing amount".to_string()))?
            .parse::<Decimal>()
            .map_err(|e| invalid(e.to_string()))?;

        let transaction = Transaction {
            id,
            customer_id,
            customer_name: self.customer_name.unwrap_or_default().trim().to_string(),
            transaction_date,
            amount,
            description: self.description.unwrap_or_default(),
        };
        transaction.validate()?;
        Ok(transaction)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, date: &str, amount: &str) -> RawTransaction {
        RawTransaction {
            id: Some(id.to_string()),
            customer_id: Some("CUST001".to_string()),
            customer_name: Some("John Smith".to_string()),
            transaction_date: Some(date.to_string()),
            amount: Some(amount.to_string()),
            description: Some("Electronics Purchase".to_string()),
        }
    }

    fn reason(err: RewardsError) -> (String, String) {
        match err {
            RewardsError::Validation {
                transaction_id,
                reason,
            } => (transaction_id, reason),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_record_converts() {
        let tx = raw("1", "2024-09-05", "120.00").into_transaction(1).unwrap();
        assert_eq!(tx.id, 1);
        assert_eq!(tx.customer_id, "CUST001");
        assert_eq!(tx.customer_name, "John Smith");
        assert_eq!(
            tx.transaction_date,
            NaiveDate::from_ymd_opt(2024, 9, 5).unwrap()
        );
        assert_eq!(tx.amount, Decimal::from_whole(120));
        assert_eq!(tx.description, "Electronics Purchase");
    }

    #[test]
    fn test_zero_amount_accepted() {
        let tx = raw("2", "2024-09-05", "0").into_transaction(1).unwrap();
        assert_eq!(tx.amount, Decimal::ZERO);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let (id, why) = reason(raw("7", "2024-09-05", "-10.5").into_transaction(1).unwrap_err());
        assert_eq!(id, "7");
        assert_eq!(why, "negative amount -10.5");
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        let (id, why) = reason(raw("8", "2024-09-05", "ten").into_transaction(1).unwrap_err());
        assert_eq!(id, "8");
        assert!(why.contains("not a valid decimal amount"));
    }

    #[test]
    fn test_out_of_range_amount_rejected() {
        let (id, why) = reason(raw("10", "2024-09-05", "1e20").into_transaction(1).unwrap_err());
        assert_eq!(id, "10");
        assert_eq!(why, "'1e20' is out of range for an amount");
    }

    #[test]
    fn test_large_in_range_amount_accepted() {
        let tx = raw("11", "2024-09-05", "500000000000000")
            .into_transaction(1)
            .unwrap();
        assert_eq!(tx.amount, Decimal::from_whole(500_000_000_000_000));
    }

    #[test]
    fn test_missing_amount_rejected() {
        let mut record = raw("9", "2024-09-05", "");
        let (_, why) = reason(record.clone().into_transaction(1).unwrap_err());
        assert_eq!(why, "missing amount");
        record.amount = None;
        let (_, why) = reason(record.into_transaction(1).unwrap_err());
        assert_eq!(why, "missing amount");
    }

    #[test]
    fn test_unparseable_date_rejected() {
        for bad in ["2024-13-01", "09/05/2024", "2024-02-30", "2024-09-05T10:00:00"] {
            let (id, why) = reason(raw("3", bad, "10").into_transaction(1).unwrap_err());
            assert_eq!(id, "3");
            assert!(why.starts_with("unparseable date"), "{}", why);
        }
    }

    #[test]
    fn test_missing_id_reports_position() {
        let mut record = raw("", "2024-09-05", "10");
        record.id = None;
        let (id, why) = reason(record.into_transaction(4).unwrap_err());
        assert_eq!(id, "at record 4");
        assert_eq!(why, "missing transaction id");
    }

    #[test]
    fn test_unparseable_id_rejected() {
        let (id, why) = reason(raw("TX-1", "2024-09-05", "10").into_transaction(1).unwrap_err());
        assert_eq!(id, "TX-1");
        assert!(why.starts_with("unparseable transaction id"));
    }

    #[test]
    fn test_missing_customer_rejected() {
        let mut record = raw("5", "2024-09-05", "10");
        record.customer_id = Some("  ".to_string());
        let (_, why) = reason(record.into_transaction(1).unwrap_err());
        assert_eq!(why, "missing customer id");
    }

    #[test]
    fn test_missing_name_and_description_allowed() {
        let mut record = raw("6", "2024-09-05", "10");
        record.customer_name = None;
        record.description = None;
        let tx = record.into_transaction(1).unwrap();
        assert_eq!(tx.customer_name, "");
        assert_eq!(tx.description, "");
    }

    #[test]
    fn test_validate_typed_negative_amount() {
        let tx = Transaction {
            id: 11,
            customer_id: "CUST002".to_string(),
            customer_name: "Sarah Johnson".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 10, 5).unwrap(),
            amount: Decimal::from_whole(-1),
            description: String::new(),
        };
        let (id, _) = reason(tx.validate().unwrap_err());
        assert_eq!(id, "11");
    }
}
