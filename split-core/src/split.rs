//! Split calculator
//!
//! Converts one expense's amount and split rule into monetary shares.
//!
//! # Rules
//!
//! | Split type   | Share of person `i`                    |
//! |--------------|----------------------------------------|
//! | `EQUAL`      | `amount / N`                           |
//! | `PERCENTAGE` | `amount × value_i / 100`               |
//! | `SHARE`      | `amount × value_i / Σvalue`            |
//! | `EXACT`      | `value_i`                              |
//!
//! Each share is rounded on its own (see [`crate::money`]); the remainder
//! left by rounding is not redistributed.
//!
//! # Example
//!
//! ```text
//! EQUAL, amount 10.00, [Alice, Bob, Carol]
//!   shares: 3.33 / 3.33 / 3.33
//!   drift:  0.01 (within 0.01 × 3)
//! ```

use crate::{
    money::round_currency,
    types::{SplitEntry, SplitType},
    validation::{validate_split, ValidationErrors},
    Result,
};
use rust_decimal::Decimal;

/// Compute per-person shares, in input order
///
/// Fails with a validation error when the split specification is malformed:
/// empty, duplicate or blank persons, negative values, a non-positive SHARE
/// total or an EXACT sum that misses `amount` by more than 0.01.
pub fn compute_shares(
    amount: Decimal,
    split_type: SplitType,
    split_data: &[SplitEntry],
) -> Result<Vec<SplitEntry>> {
    let mut errors = ValidationErrors::new();
    validate_split(amount, split_type, split_data, &mut errors);
    errors.into_result()?;

    Ok(allocate(amount, split_type, split_data))
}

/// Share arithmetic on an already validated specification
pub(crate) fn allocate(
    amount: Decimal,
    split_type: SplitType,
    split_data: &[SplitEntry],
) -> Vec<SplitEntry> {
    let shares: Vec<SplitEntry> = match split_type {
        SplitType::Equal => {
            let per_person = round_currency(amount / Decimal::from(split_data.len()));
            split_data
                .iter()
                .map(|e| SplitEntry::new(e.person.clone(), per_person))
                .collect()
        }
        SplitType::Percentage => split_data
            .iter()
            .map(|e| {
                let share = amount * e.value / Decimal::ONE_HUNDRED;
                SplitEntry::new(e.person.clone(), round_currency(share))
            })
            .collect(),
        SplitType::Share => {
            let total_shares: Decimal = split_data.iter().map(|e| e.value).sum();
            split_data
                .iter()
                .map(|e| {
                    let share = amount * e.value / total_shares;
                    SplitEntry::new(e.person.clone(), round_currency(share))
                })
                .collect()
        }
        SplitType::Exact => split_data
            .iter()
            .map(|e| SplitEntry::new(e.person.clone(), round_currency(e.value)))
            .collect(),
    };

    let allocated: Decimal = shares.iter().map(|s| s.value).sum();
    tracing::debug!(
        split_type = %split_type,
        participants = shares.len(),
        %amount,
        drift = %(amount - allocated),
        "Shares computed"
    );

    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::drift_bound;
    use rust_decimal_macros::dec;

    fn people(names: &[&str]) -> Vec<SplitEntry> {
        names
            .iter()
            .map(|p| SplitEntry::new(*p, Decimal::ZERO))
            .collect()
    }

    fn weighted(values: &[(&str, Decimal)]) -> Vec<SplitEntry> {
        values
            .iter()
            .map(|(p, v)| SplitEntry::new(*p, *v))
            .collect()
    }

    fn values(shares: &[SplitEntry]) -> Vec<Decimal> {
        shares.iter().map(|s| s.value).collect()
    }

    #[test]
    fn test_overflowing_input_is_a_validation_error() {
        let data = weighted(&[("A", dec!(100))]);
        let err = compute_shares(Decimal::MAX, SplitType::Percentage, &data).unwrap_err();
        assert!(err.validation_errors().contains("AMOUNT_TOO_LARGE"));

        let data = weighted(&[("A", Decimal::MAX), ("B", dec!(1))]);
        let err = compute_shares(dec!(100), SplitType::Share, &data).unwrap_err();
        assert!(err.validation_errors().contains("VALUE_TOO_LARGE"));
    }

    #[test]
    fn test_equal_split() {
        let shares =
            compute_shares(dec!(30), SplitType::Equal, &people(&["Alice", "Bob", "Carol"]))
                .unwrap();
        assert_eq!(values(&shares), vec![dec!(10), dec!(10), dec!(10)]);
        assert_eq!(shares[0].person.as_str(), "Alice");
    }

    #[test]
    fn test_equal_split_drift_is_not_redistributed() {
        let shares =
            compute_shares(dec!(10), SplitType::Equal, &people(&["A", "B", "C"])).unwrap();
        assert_eq!(values(&shares), vec![dec!(3.33), dec!(3.33), dec!(3.33)]);

        let total: Decimal = shares.iter().map(|s| s.value).sum();
        assert_eq!(dec!(10) - total, dec!(0.01));
        assert!((dec!(10) - total).abs() <= drift_bound(3));
    }

    #[test]
    fn test_equal_split_rounds_half_up() {
        // 0.05 / 2 = 0.025
        let shares = compute_shares(dec!(0.05), SplitType::Equal, &people(&["A", "B"])).unwrap();
        assert_eq!(values(&shares), vec![dec!(0.03), dec!(0.03)]);
    }

    #[test]
    fn test_equal_split_ignores_values() {
        let data = weighted(&[("A", dec!(99)), ("B", dec!(-5))]);
        let shares = compute_shares(dec!(20), SplitType::Equal, &data).unwrap();
        assert_eq!(values(&shares), vec![dec!(10), dec!(10)]);
    }

    #[test]
    fn test_percentage_split() {
        let data = weighted(&[("Alice", dec!(50)), ("Bob", dec!(25)), ("Carol", dec!(25))]);
        let shares = compute_shares(dec!(200), SplitType::Percentage, &data).unwrap();
        assert_eq!(values(&shares), vec![dec!(100), dec!(50), dec!(50)]);
    }

    #[test]
    fn test_percentage_split_does_not_check_total() {
        let data = weighted(&[("Alice", dec!(10)), ("Bob", dec!(10))]);
        let shares = compute_shares(dec!(100), SplitType::Percentage, &data).unwrap();
        assert_eq!(values(&shares), vec![dec!(10), dec!(10)]);
    }

    #[test]
    fn test_share_split() {
        let data = weighted(&[("Alice", dec!(2)), ("Bob", dec!(1)), ("Carol", dec!(1))]);
        let shares = compute_shares(dec!(100), SplitType::Share, &data).unwrap();
        assert_eq!(values(&shares), vec![dec!(50), dec!(25), dec!(25)]);
    }

    #[test]
    fn test_share_split_with_zero_weight() {
        let data = weighted(&[("Alice", dec!(3)), ("Bob", dec!(0))]);
        let shares = compute_shares(dec!(45), SplitType::Share, &data).unwrap();
        assert_eq!(values(&shares), vec![dec!(45), dec!(0)]);
    }

    #[test]
    fn test_share_split_zero_total_rejected() {
        let data = weighted(&[("Alice", dec!(0)), ("Bob", dec!(0))]);
        let err = compute_shares(dec!(45), SplitType::Share, &data).unwrap_err();
        assert!(err.validation_errors().contains("NON_POSITIVE_SHARE_TOTAL"));
    }

    #[test]
    fn test_exact_split_passes_values_through() {
        let data = weighted(&[("Alice", dec!(12.345)), ("Bob", dec!(37.655))]);
        let shares = compute_shares(dec!(50), SplitType::Exact, &data).unwrap();
        assert_eq!(values(&shares), vec![dec!(12.35), dec!(37.66)]);
    }

    #[test]
    fn test_exact_split_sum_mismatch_rejected() {
        let data = weighted(&[("Alice", dec!(25)), ("Bob", dec!(24.98))]);
        let err = compute_shares(dec!(50), SplitType::Exact, &data).unwrap_err();
        assert!(err.validation_errors().contains("EXACT_SUM_MISMATCH"));
    }

    #[test]
    fn test_duplicate_person_rejected() {
        let err = compute_shares(dec!(20), SplitType::Equal, &people(&["Alice", "Alice"]))
            .unwrap_err();
        assert!(err.validation_errors().contains("DUPLICATE_PERSON"));
    }
}
