//! Settlement plan
//!
//! Greedy debt simplification over net balances.
//!
//! # Algorithm
//!
//! 1. Split participants into creditors (balance > 0.01) and debtors
//!    (balance < -0.01); everyone else is already settled
//! 2. Keep each side in a max-heap keyed by remaining amount, ties broken by
//!    ascending participant identifier
//! 3. Repeatedly match the largest debtor with the largest creditor for
//!    `min(debt, credit)` and push back whoever still has ≥ 0.01 left
//!
//! Every match retires at least one participant, so a plan never holds more
//! than `creditors + debtors - 1` transactions. This is a heuristic: the true
//! minimum number of transactions is NP-hard to find in general and is not
//! guaranteed here.
//!
//! # Example
//!
//! ```text
//! Balances:
//!   Alice: +20.00
//!   Bob:   -10.00
//!   Carol: -10.00
//!
//! Plan:
//!   Bob   pays Alice 10.00
//!   Carol pays Alice 10.00
//! ```
//!
//! Residual imbalance caused by rounding drift is dropped from the plan
//! instead of being reported as an error.

use crate::{
    money::{round_currency, TOLERANCE},
    types::{Balances, ParticipantId, Transaction},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Outstanding amount of one creditor or debtor
#[derive(Debug, Clone, PartialEq, Eq)]
struct Position {
    person: ParticipantId,
    remaining: Decimal,
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        // Larger amount first; on ties the lexically smaller identifier wins
        self.remaining
            .cmp(&other.remaining)
            .then_with(|| other.person.cmp(&self.person))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of one settlement run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Transactions in the order they were matched
    pub transactions: Vec<Transaction>,

    /// Participants owed money when the run started
    pub creditor_count: usize,

    /// Participants owing money when the run started
    pub debtor_count: usize,

    /// Sum of all transaction amounts
    pub total_transferred: Decimal,

    /// Amount left unmatched because of rounding drift
    pub unmatched: Decimal,
}

impl SettlementPlan {
    /// Upper bound on the transaction count for this run
    pub fn max_transactions(&self) -> usize {
        (self.creditor_count + self.debtor_count).saturating_sub(1)
    }

    /// Whether there was nothing to settle
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Settlement engine
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    /// Balances at or below this magnitude count as settled
    threshold: Decimal,
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self {
            threshold: TOLERANCE,
        }
    }
}

impl SettlementEngine {
    /// Create new settlement engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the settlement plan for a balance map
    pub fn plan(&self, balances: &Balances) -> SettlementPlan {
        let (mut creditors, mut debtors) = self.partition(balances);
        let creditor_count = creditors.len();
        let debtor_count = debtors.len();

        let mut transactions = Vec::new();
        let mut total_transferred = Decimal::ZERO;

        loop {
            let (mut creditor, mut debtor) = match (creditors.pop(), debtors.pop()) {
                (Some(creditor), Some(debtor)) => (creditor, debtor),
                (creditor, debtor) => {
                    creditors.extend(creditor);
                    debtors.extend(debtor);
                    break;
                }
            };

            let amount = round_currency(creditor.remaining.min(debtor.remaining));

            transactions.push(Transaction {
                from: debtor.person.clone(),
                to: creditor.person.clone(),
                amount,
            });
            total_transferred += amount;

            creditor.remaining -= amount;
            debtor.remaining -= amount;

            if creditor.remaining >= TOLERANCE {
                creditors.push(creditor);
            }
            if debtor.remaining >= TOLERANCE {
                debtors.push(debtor);
            }
        }

        let unmatched: Decimal = creditors
            .iter()
            .chain(debtors.iter())
            .map(|p| p.remaining)
            .sum();

        if unmatched > Decimal::ZERO {
            tracing::debug!(%unmatched, "Rounding residual left out of settlement plan");
        }

        tracing::info!(
            "Settlement plan: {} creditors, {} debtors -> {} transactions ({} transferred)",
            creditor_count,
            debtor_count,
            transactions.len(),
            total_transferred
        );

        SettlementPlan {
            transactions,
            creditor_count,
            debtor_count,
            total_transferred,
            unmatched,
        }
    }

    /// Separate creditors from debtors, dropping settled participants
    fn partition(&self, balances: &Balances) -> (BinaryHeap<Position>, BinaryHeap<Position>) {
        let mut creditors = BinaryHeap::new();
        let mut debtors = BinaryHeap::new();

        for (person, balance) in balances {
            if *balance > self.threshold {
                creditors.push(Position {
                    person: person.clone(),
                    remaining: round_currency(*balance),
                });
            } else if *balance < -self.threshold {
                debtors.push(Position {
                    person: person.clone(),
                    remaining: round_currency(-*balance),
                });
            }
        }

        (creditors, debtors)
    }
}

/// Ordered settlement transactions for a balance map
pub fn compute_settlements(balances: &Balances) -> Vec<Transaction> {
    SettlementEngine::default().plan(balances).transactions
}
