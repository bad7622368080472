//! Expense storage
//!
//! The service only talks to storage through [`ExpenseRepository`], so the
//! settlement logic never depends on where expenses live.

use crate::errors::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use split_core::Expense;
use uuid::Uuid;

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Every expense, newest first
    async fn list(&self) -> Result<Vec<Expense>>;

    async fn get(&self, id: Uuid) -> Result<Option<Expense>>;

    async fn insert(&self, expense: &Expense) -> Result<()>;

    /// Overwrite a stored expense; false when the id is unknown
    async fn update(&self, expense: &Expense) -> Result<bool>;

    /// Remove an expense; false when the id is unknown
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Process-local store, used for tests and the `memory` backend
#[derive(Debug, Default)]
pub struct InMemoryExpenseRepository {
    expenses: RwLock<Vec<Expense>>,
}

impl InMemoryExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn list(&self) -> Result<Vec<Expense>> {
        let mut expenses = self.expenses.read().clone();
        // Stable sort keeps the later insert first on equal timestamps
        expenses.reverse();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(expenses)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Expense>> {
        Ok(self.expenses.read().iter().find(|e| e.id == id).cloned())
    }

    async fn insert(&self, expense: &Expense) -> Result<()> {
        self.expenses.write().push(expense.clone());
        Ok(())
    }

    async fn update(&self, expense: &Expense) -> Result<bool> {
        let mut expenses = self.expenses.write();
        match expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(stored) => {
                *stored = expense.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut expenses = self.expenses.write();
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        Ok(expenses.len() != before)
    }
}
