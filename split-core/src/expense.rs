//! Expense records
//!
//! An [`Expense`] is only ever built from a validated [`ExpenseDraft`], so a
//! stored record always carries computed shares that satisfy the split rule.
//! Validation and share computation finish before anything is written
//! (all-or-nothing).

use crate::{
    split::allocate,
    types::{ParticipantId, SplitEntry, SplitType},
    validation::validate_expense,
    Result,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Expense fields as submitted by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// Total amount paid
    pub amount: Decimal,

    /// What the money was spent on
    pub description: String,

    /// Participant who paid
    pub paid_by: ParticipantId,

    /// Split rule
    pub split_type: SplitType,

    /// Raw share specification (participant list for EQUAL)
    pub split_data: Vec<SplitEntry>,
}

impl ExpenseDraft {
    /// Create a draft with no participants yet
    pub fn new(
        amount: Decimal,
        description: impl Into<String>,
        paid_by: impl Into<ParticipantId>,
        split_type: SplitType,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            paid_by: paid_by.into(),
            split_type,
            split_data: Vec::new(),
        }
    }

    /// Add participants without a value (EQUAL splits)
    pub fn with_participants<I, P>(mut self, people: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantId>,
    {
        self.split_data
            .extend(people.into_iter().map(|p| SplitEntry::new(p, Decimal::ZERO)));
        self
    }

    /// Add one participant with its raw split value
    pub fn with_entry(mut self, person: impl Into<ParticipantId>, value: Decimal) -> Self {
        self.split_data.push(SplitEntry::new(person, value));
        self
    }

    /// Check every field and the split without computing anything
    pub fn validate(&self) -> Result<()> {
        validate_expense(
            self.amount,
            &self.description,
            &self.paid_by,
            self.split_type,
            &self.split_data,
        )
    }
}

/// Recorded expense with computed shares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID
    pub id: Uuid,

    /// Total amount paid
    pub amount: Decimal,

    /// Trimmed description
    pub description: String,

    /// Participant who paid
    pub paid_by: ParticipantId,

    /// Split rule
    pub split_type: SplitType,

    /// Share specification as submitted
    pub split_spec: Vec<SplitEntry>,

    /// Computed monetary share per person, in submission order
    pub split_data: Vec<SplitEntry>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Validate a draft and compute its shares
    pub fn record(draft: ExpenseDraft) -> Result<Self> {
        draft.validate()?;

        let split_data = allocate(draft.amount, draft.split_type, &draft.split_data);
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            amount: draft.amount,
            description: draft.description.trim().to_string(),
            paid_by: draft.paid_by,
            split_type: draft.split_type,
            split_spec: draft.split_data,
            split_data,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace every field with the draft's
    ///
    /// Shares are recomputed only when the amount, split type or raw split
    /// specification differ from the stored ones. Returns whether they were.
    /// On error the expense is left untouched.
    pub fn revise(&mut self, draft: ExpenseDraft) -> Result<bool> {
        draft.validate()?;

        let recompute = self.split_changed(&draft);
        if recompute {
            self.split_data = allocate(draft.amount, draft.split_type, &draft.split_data);
        }

        self.amount = draft.amount;
        self.description = draft.description.trim().to_string();
        self.paid_by = draft.paid_by;
        self.split_type = draft.split_type;
        self.split_spec = draft.split_data;
        self.updated_at = Utc::now();

        Ok(recompute)
    }

    /// Whether a draft changes anything share computation depends on
    pub fn split_changed(&self, draft: &ExpenseDraft) -> bool {
        self.amount != draft.amount
            || self.split_type != draft.split_type
            || self.split_spec != draft.split_data
    }

    /// Sum of computed shares
    pub fn allocated(&self) -> Decimal {
        self.split_data.iter().map(|s| s.value).sum()
    }

    /// Amount left unallocated by per-person rounding (may be negative)
    pub fn rounding_residual(&self) -> Decimal {
        self.amount - self.allocated()
    }
}
