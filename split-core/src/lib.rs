//! Split Core
//!
//! Expense splitting and settlement computation for shared group expenses.
//!
//! # Architecture
//!
//! Two components run in sequence over a list of recorded expenses:
//!
//! 1. **Split Calculator** (write time): turns one expense's amount and split
//!    rule into per-participant monetary shares
//! 2. **Settlement Engine** (read time): folds every expense into net
//!    balances, then matches debtors with creditors into a settlement plan
//!
//! # Settlement Algorithm
//!
//! Greedy largest-creditor / largest-debtor matching:
//! - Emits at most `creditors + debtors - 1` transactions
//! - Deterministic: equal amounts are ordered by participant identifier
//! - A heuristic, not a global minimum (exact minimisation is NP-hard)
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use split_core::{compute_balances, compute_settlements, Expense, ExpenseDraft, SplitType};
//!
//! fn main() -> split_core::Result<()> {
//!     let draft = ExpenseDraft::new(Decimal::from(30), "Dinner", "Alice", SplitType::Equal)
//!         .with_participants(["Alice", "Bob", "Carol"]);
//!     let expense = Expense::record(draft)?;
//!
//!     let balances = compute_balances(&[expense]);
//!     let plan = compute_settlements(&balances);
//!     assert_eq!(plan.len(), 2);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod balance;
pub mod error;
pub mod expense;
pub mod money;
pub mod settlement;
pub mod split;
pub mod types;
pub mod validation;

// Re-exports
pub use balance::{compute_balances, participants};
pub use error::{Error, Result};
pub use expense::{Expense, ExpenseDraft};
pub use settlement::{compute_settlements, SettlementEngine, SettlementPlan};
pub use split::compute_shares;
pub use types::*;
pub use validation::{ValidationErrors, ValidationIssue};
