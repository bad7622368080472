use crate::errors::{request_errors, ExpenseServiceError, Result};
use crate::metrics;
use crate::models::{ExpenseRequest, SettlementSummary};
use crate::repository::ExpenseRepository;
use split_core::{
    compute_balances, participants, Balances, Expense, ExpenseDraft, ParticipantId,
    SettlementEngine, Transaction, ValidationErrors,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepository>,
    settlement_engine: SettlementEngine,
}

impl ExpenseService {
    pub fn new(repository: Arc<dyn ExpenseRepository>) -> Self {
        ExpenseService {
            repository,
            settlement_engine: SettlementEngine::new(),
        }
    }

    /// Request checks and split checks, reported together
    fn validate(&self, request: ExpenseRequest) -> Result<ExpenseDraft> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = request.validate() {
            errors.merge(request_errors(&e));
        }

        let draft = ExpenseDraft::from(request);
        if let Err(split_core::Error::Validation(split_errors)) = draft.validate() {
            errors.merge(split_errors);
        }

        if errors.is_empty() {
            Ok(draft)
        } else {
            metrics::VALIDATION_REJECTIONS.inc();
            warn!("Expense rejected: {}", errors);
            Err(ExpenseServiceError::Validation(errors))
        }
    }

    /// Record a new expense
    pub async fn create_expense(&self, request: ExpenseRequest) -> Result<Expense> {
        let draft = self.validate(request)?;
        let expense = Expense::record(draft)?;

        self.repository.insert(&expense).await?;

        metrics::EXPENSES_RECORDED
            .with_label_values(&[expense.split_type.as_str()])
            .inc();
        info!(
            "Expense {} recorded: {} paid {} split {} ways ({})",
            expense.id,
            expense.paid_by,
            expense.amount,
            expense.split_data.len(),
            expense.split_type
        );

        Ok(expense)
    }

    /// All expenses, newest first
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.repository.list().await
    }

    pub async fn get_expense(&self, id: Uuid) -> Result<Expense> {
        self.repository
            .get(id)
            .await?
            .ok_or(ExpenseServiceError::ExpenseNotFound(id))
    }

    /// Replace every field of an expense
    pub async fn update_expense(&self, id: Uuid, request: ExpenseRequest) -> Result<Expense> {
        let mut expense = self.get_expense(id).await?;
        let draft = self.validate(request)?;

        let recomputed = expense.revise(draft)?;

        if !self.repository.update(&expense).await? {
            return Err(ExpenseServiceError::ExpenseNotFound(id));
        }

        metrics::EXPENSES_UPDATED
            .with_label_values(&[if recomputed { "true" } else { "false" }])
            .inc();
        info!("Expense {} updated (shares recomputed: {})", id, recomputed);

        Ok(expense)
    }

    pub async fn delete_expense(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(ExpenseServiceError::ExpenseNotFound(id));
        }

        metrics::EXPENSES_DELETED.inc();
        info!("Expense {} deleted", id);
        Ok(())
    }

    /// Everyone appearing as payer or participant
    pub async fn list_people(&self) -> Result<Vec<ParticipantId>> {
        let expenses = self.repository.list().await?;
        Ok(participants(&expenses).into_iter().collect())
    }

    /// Net balance per participant over every expense
    pub async fn balances(&self) -> Result<Balances> {
        let expenses = self.repository.list().await?;
        metrics::SETTLEMENT_RUNS.with_label_values(&["balances"]).inc();
        Ok(compute_balances(&expenses))
    }

    /// Transactions that settle every balance
    pub async fn settlements(&self) -> Result<Vec<Transaction>> {
        Ok(self.settlement_summary().await?.transactions)
    }

    pub async fn settlement_summary(&self) -> Result<SettlementSummary> {
        let expenses = self.repository.list().await?;
        let balances = compute_balances(&expenses);
        let plan = self.settlement_engine.plan(&balances);

        metrics::SETTLEMENT_RUNS.with_label_values(&["settlements"]).inc();
        metrics::SETTLEMENT_PLAN_SIZE.observe(plan.transactions.len() as f64);

        Ok(SettlementSummary::new(plan, expenses.len()))
    }
}
