//! Tiered points rule for a single transaction.
//!
//! | Portion of the amount | Rate           |
//! |-----------------------|----------------|
//! | up to $50             | 0 pts / dollar |
//! | $50 to $100           | 1 pt / dollar  |
//! | over $100             | 2 pts / dollar |
//!
//! Each transaction is rated on its own; tiers never span transactions.
//! The fractional result is rounded half away from zero.

use crate::decimal::{Decimal, SCALE};

/// Points earned.
pub type Points = u64;

const LOWER_THRESHOLD: i128 = 50 * SCALE as i128;
const UPPER_THRESHOLD: i128 = 100 * SCALE as i128;
const UPPER_TIER_RATE: i128 = 2;

/// Points earned by a single transaction amount.
///
/// Negative amounts are rejected during validation and earn nothing here.
/// Widened arithmetic keeps the full `Decimal` range free of overflow.
pub fn calculate_points(amount: Decimal) -> Points {
    let amount = i128::from(amount.0);
    let middle_tier = (amount.min(UPPER_THRESHOLD) - LOWER_THRESHOLD).max(0);
    let upper_tier = (amount - UPPER_THRESHOLD).max(0);

    // Ten-thousandths of a point, rounded half away from zero.
    let raw = middle_tier + upper_tier * UPPER_TIER_RATE;
    let whole = (raw + i128::from(SCALE / 2)) / i128::from(SCALE);
    Points::try_from(whole).unwrap_or(Points::MAX)
}
