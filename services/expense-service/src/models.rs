use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use split_core::{ExpenseDraft, ParticipantId, SettlementPlan, SplitEntry, SplitType, Transaction};

/// Create / update expense request
#[derive(Debug, Clone, Deserialize, Serialize, validator::Validate)]
pub struct ExpenseRequest {
    pub amount: Decimal,

    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: String,

    #[validate(length(max = 100, message = "Payer name must be at most 100 characters"))]
    pub paid_by: String,

    pub split_type: SplitType,

    #[validate(length(max = 100, message = "An expense can be split between at most 100 people"))]
    pub split_data: Vec<SplitEntry>,
}

impl From<ExpenseRequest> for ExpenseDraft {
    fn from(request: ExpenseRequest) -> Self {
        ExpenseDraft {
            amount: request.amount,
            description: request.description,
            paid_by: ParticipantId::new(request.paid_by.trim()),
            split_type: request.split_type,
            split_data: request.split_data,
        }
    }
}

/// Response envelope shared by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Settlement plan as returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub transactions: Vec<Transaction>,
    pub creditor_count: usize,
    pub debtor_count: usize,
    pub total_transferred: Decimal,
    pub expense_count: usize,
}

impl SettlementSummary {
    pub fn new(plan: SettlementPlan, expense_count: usize) -> Self {
        SettlementSummary {
            transactions: plan.transactions,
            creditor_count: plan.creditor_count,
            debtor_count: plan.debtor_count,
            total_transferred: plan.total_transferred,
            expense_count,
        }
    }
}
