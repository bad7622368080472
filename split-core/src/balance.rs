//! Balance aggregation
//!
//! Folds every recorded expense into one net position per participant:
//!
//! ```text
//! balance(p) = Σ amount paid by p − Σ shares owed by p
//! ```
//!
//! A payer listed in its own split owes its share like anyone else, which
//! nets out naturally. Balances are recomputed from the full expense set on
//! every call; nothing is cached.

use crate::{
    expense::Expense,
    money::round_currency,
    types::{Balances, ParticipantId},
};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Net balance per participant, rounded to currency precision
///
/// `Σbalances` equals the sum of every expense's rounding residual
/// (`amount − Σshares`, see [`Expense::rounding_residual`]), so it is zero
/// up to accumulated rounding drift.
pub fn compute_balances(expenses: &[Expense]) -> Balances {
    let mut balances = Balances::new();

    for expense in expenses {
        *balances
            .entry(expense.paid_by.clone())
            .or_insert(Decimal::ZERO) += expense.amount;

        for share in &expense.split_data {
            *balances
                .entry(share.person.clone())
                .or_insert(Decimal::ZERO) -= share.value;
        }
    }

    for balance in balances.values_mut() {
        *balance = round_currency(*balance);
    }

    balances
}

/// Everyone who paid for or shares in at least one expense
pub fn participants(expenses: &[Expense]) -> BTreeSet<ParticipantId> {
    expenses
        .iter()
        .flat_map(|e| {
            std::iter::once(e.paid_by.clone()).chain(e.split_data.iter().map(|s| s.person.clone()))
        })
        .collect()
}

/// Grand total of a balance map; non-zero only through rounding drift
pub fn net_total(balances: &Balances) -> Decimal {
    balances.values().copied().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{expense::ExpenseDraft, money::drift_bound, types::SplitType};
    use rust_decimal_macros::dec;

    fn equal(amount: Decimal, payer: &str, people: &[&str]) -> Expense {
        let draft = ExpenseDraft::new(amount, "test", payer, SplitType::Equal)
            .with_participants(people.iter().copied());
        Expense::record(draft).unwrap()
    }

    fn balance(balances: &Balances, person: &str) -> Decimal {
        balances[&ParticipantId::new(person)]
    }

    #[test]
    fn test_single_equal_expense() {
        let balances = compute_balances(&[equal(dec!(30), "Alice", &["Alice", "Bob", "Carol"])]);

        assert_eq!(balance(&balances, "Alice"), dec!(20));
        assert_eq!(balance(&balances, "Bob"), dec!(-10));
        assert_eq!(balance(&balances, "Carol"), dec!(-10));
        assert_eq!(net_total(&balances), Decimal::ZERO);
    }

    #[test]
    fn test_two_expenses_net_out() {
        let expenses = vec![
            equal(dec!(100), "Alice", &["Alice", "Bob"]),
            equal(dec!(60), "Bob", &["Alice", "Bob"]),
        ];
        let balances = compute_balances(&expenses);

        assert_eq!(balance(&balances, "Alice"), dec!(20));
        assert_eq!(balance(&balances, "Bob"), dec!(-20));
    }

    #[test]
    fn test_payer_outside_split() {
        let balances = compute_balances(&[equal(dec!(40), "Dave", &["Alice", "Bob"])]);

        assert_eq!(balance(&balances, "Dave"), dec!(40));
        assert_eq!(balance(&balances, "Alice"), dec!(-20));
        assert_eq!(balance(&balances, "Bob"), dec!(-20));
    }

    #[test]
    fn test_drift_stays_within_bound() {
        let expenses = vec![
            equal(dec!(10), "A", &["A", "B", "C"]),
            equal(dec!(10), "B", &["A", "B", "C"]),
        ];
        let balances = compute_balances(&expenses);

        assert_eq!(net_total(&balances), dec!(0.02));
        assert!(net_total(&balances).abs() <= drift_bound(expenses.len()));
    }

    #[test]
    fn test_empty_expense_set() {
        assert!(compute_balances(&[]).is_empty());
        assert!(participants(&[]).is_empty());
    }

    #[test]
    fn test_participants() {
        let expenses = vec![
            equal(dec!(40), "Dave", &["Alice", "Bob"]),
            equal(dec!(10), "Bob", &["Carol"]),
        ];
        let people: Vec<String> = participants(&expenses)
            .into_iter()
            .map(|p| p.to_string())
            .collect();

        assert_eq!(people, vec!["Alice", "Bob", "Carol", "Dave"]);
    }

    #[test]
    fn test_idempotent() {
        let expenses = vec![
            equal(dec!(17.35), "A", &["A", "B", "C"]),
            equal(dec!(9.99), "C", &["B", "C"]),
        ];
        assert_eq!(compute_balances(&expenses), compute_balances(&expenses));
    }
}
