//! Expense validation
//!
//! A single pre-condition check runs before any share computation. It
//! collects every violation instead of stopping at the first one, so callers
//! can fix the whole request in one round trip.

use crate::money::{round_currency, within_tolerance, MAX_AMOUNT, TOLERANCE};
use crate::types::{ParticipantId, SplitEntry, SplitType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Single validation violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Machine readable code, e.g. `DUPLICATE_PERSON`
    pub code: String,

    /// Offending field, e.g. `split_data[2].person`
    pub field_path: String,

    /// Human readable message
    pub message: String,
}

/// Every violation found in one expense
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    /// Empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn add(&mut self, code: &str, field_path: &str, message: String) {
        self.issues.push(ValidationIssue {
            code: code.to_string(),
            field_path: field_path.to_string(),
            message,
        });
    }

    /// Append the violations of another check
    pub fn merge(&mut self, other: ValidationErrors) {
        self.issues.extend(other.issues);
    }

    /// Recorded violations
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether a violation with `code` was recorded
    pub fn contains(&self, code: &str) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    /// `Ok(())` when empty, otherwise the collected errors
    pub fn into_result(self) -> crate::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.issues.iter().map(|i| i.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Amount, split type and split specification of an expense
pub fn validate_split(
    amount: Decimal,
    split_type: SplitType,
    split_data: &[SplitEntry],
    errors: &mut ValidationErrors,
) {
    if amount < TOLERANCE {
        errors.add(
            "INVALID_AMOUNT",
            "amount",
            format!("Amount must be at least 0.01, got {}", amount),
        );
    } else if amount > MAX_AMOUNT {
        errors.add(
            "AMOUNT_TOO_LARGE",
            "amount",
            format!("Amount must not exceed {}, got {}", MAX_AMOUNT, amount),
        );
    }

    if split_data.is_empty() {
        errors.add(
            "EMPTY_SPLIT",
            "split_data",
            "split_data must list at least one person".to_string(),
        );
        return;
    }

    // Sums below are only safe once every operand is within the ceiling
    let mut in_range = amount.abs() <= MAX_AMOUNT;
    let mut seen: HashSet<&ParticipantId> = HashSet::new();
    for (idx, entry) in split_data.iter().enumerate() {
        if entry.person.is_blank() {
            errors.add(
                "INVALID_PERSON",
                &format!("split_data[{}].person", idx),
                "Each split item requires a valid person name".to_string(),
            );
        } else if !seen.insert(&entry.person) {
            errors.add(
                "DUPLICATE_PERSON",
                &format!("split_data[{}].person", idx),
                format!("Person '{}' appears more than once", entry.person),
            );
        }

        if split_type == SplitType::Equal {
            continue;
        }

        if entry.value < Decimal::ZERO {
            errors.add(
                "NEGATIVE_VALUE",
                &format!("split_data[{}].value", idx),
                format!("Split value for '{}' must not be negative", entry.person),
            );
        }

        if entry.value.abs() > MAX_AMOUNT {
            in_range = false;
            errors.add(
                "VALUE_TOO_LARGE",
                &format!("split_data[{}].value", idx),
                format!("Split value for '{}' must not exceed {}", entry.person, MAX_AMOUNT),
            );
        }
    }

    if !in_range {
        return;
    }

    let total: Decimal = split_data.iter().map(|e| e.value).sum();
    match split_type {
        SplitType::Share if total <= Decimal::ZERO => {
            errors.add(
                "NON_POSITIVE_SHARE_TOTAL",
                "split_data",
                "Total of shares must be greater than zero".to_string(),
            );
        }
        SplitType::Exact if !within_tolerance(total, amount) => {
            errors.add(
                "EXACT_SUM_MISMATCH",
                "split_data",
                format!(
                    "Sum of exact amounts must equal expense total ({} != {})",
                    round_currency(total),
                    amount
                ),
            );
        }
        // Percentages summing to something other than 100 are accepted
        _ => {}
    }
}

/// Full expense: descriptive fields plus the split
pub fn validate_expense(
    amount: Decimal,
    description: &str,
    paid_by: &ParticipantId,
    split_type: SplitType,
    split_data: &[SplitEntry],
) -> crate::Result<()> {
    let mut errors = ValidationErrors::new();

    if description.trim().is_empty() {
        errors.add(
            "MISSING_DESCRIPTION",
            "description",
            "Description is required".to_string(),
        );
    }

    if paid_by.is_blank() {
        errors.add("MISSING_PAYER", "paid_by", "Payer is required".to_string());
    }

    validate_split(amount, split_type, split_data, &mut errors);
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entries(values: &[(&str, Decimal)]) -> Vec<SplitEntry> {
        values
            .iter()
            .map(|(p, v)| SplitEntry::new(*p, *v))
            .collect()
    }

    #[test]
    fn test_valid_exact_split() {
        let data = entries(&[("Alice", dec!(20)), ("Bob", dec!(30))]);
        let result = validate_expense(
            dec!(50),
            "Groceries",
            &ParticipantId::new("Alice"),
            SplitType::Exact,
            &data,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_exact_sum_mismatch() {
        let data = entries(&[("Alice", dec!(20)), ("Bob", dec!(29.98))]);
        let err = validate_expense(
            dec!(50),
            "Groceries",
            &ParticipantId::new("Alice"),
            SplitType::Exact,
            &data,
        )
        .unwrap_err();
        assert!(err.validation_errors().contains("EXACT_SUM_MISMATCH"));
    }

    #[test]
    fn test_exact_within_one_cent_is_accepted() {
        let data = entries(&[("Alice", dec!(20)), ("Bob", dec!(29.99))]);
        let mut errors = ValidationErrors::new();
        validate_split(dec!(50), SplitType::Exact, &data, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_collects_all_violations() {
        let data = entries(&[("Alice", dec!(1)), ("", dec!(1)), ("Alice", dec!(-1))]);
        let err = validate_expense(
            dec!(0),
            "  ",
            &ParticipantId::new(""),
            SplitType::Share,
            &data,
        )
        .unwrap_err();

        let errors = err.validation_errors();
        assert!(errors.contains("INVALID_AMOUNT"));
        assert!(errors.contains("MISSING_DESCRIPTION"));
        assert!(errors.contains("MISSING_PAYER"));
        assert!(errors.contains("INVALID_PERSON"));
        assert!(errors.contains("DUPLICATE_PERSON"));
        assert!(errors.contains("NEGATIVE_VALUE"));
        assert_eq!(errors.issues()[4].field_path, "split_data[2].person");
    }

    #[test]
    fn test_share_total_must_be_positive() {
        let data = entries(&[("Alice", dec!(0)), ("Bob", dec!(0))]);
        let mut errors = ValidationErrors::new();
        validate_split(dec!(10), SplitType::Share, &data, &mut errors);
        assert!(errors.contains("NON_POSITIVE_SHARE_TOTAL"));
    }

    #[test]
    fn test_percentage_total_not_checked() {
        let data = entries(&[("Alice", dec!(30)), ("Bob", dec!(30))]);
        let mut errors = ValidationErrors::new();
        validate_split(dec!(10), SplitType::Percentage, &data, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_sub_cent_amount_rejected() {
        let data = entries(&[("Alice", dec!(0)), ("Bob", dec!(0))]);

        let mut errors = ValidationErrors::new();
        validate_split(dec!(0.001), SplitType::Equal, &data, &mut errors);
        assert!(errors.contains("INVALID_AMOUNT"));

        let mut errors = ValidationErrors::new();
        validate_split(dec!(0.01), SplitType::Equal, &data, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_amount_ceiling() {
        let data = entries(&[("Alice", dec!(100))]);

        let mut errors = ValidationErrors::new();
        validate_split(Decimal::MAX, SplitType::Percentage, &data, &mut errors);
        assert!(errors.contains("AMOUNT_TOO_LARGE"));

        let mut errors = ValidationErrors::new();
        validate_split(MAX_AMOUNT, SplitType::Percentage, &data, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_oversized_values_reported_without_summing() {
        let data = entries(&[("Alice", Decimal::MAX), ("Bob", Decimal::MAX)]);
        let mut errors = ValidationErrors::new();
        validate_split(dec!(10), SplitType::Exact, &data, &mut errors);

        assert!(errors.contains("VALUE_TOO_LARGE"));
        assert!(!errors.contains("EXACT_SUM_MISMATCH"));
        assert_eq!(errors.issues().len(), 2);
    }

    #[test]
    fn test_equal_split_ignores_oversized_values() {
        let data = entries(&[("Alice", Decimal::MAX), ("Bob", Decimal::MAX)]);
        let mut errors = ValidationErrors::new();
        validate_split(dec!(10), SplitType::Equal, &data, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_split() {
        let mut errors = ValidationErrors::new();
        validate_split(dec!(10), SplitType::Equal, &[], &mut errors);
        assert!(errors.contains("EMPTY_SPLIT"));
    }
}
