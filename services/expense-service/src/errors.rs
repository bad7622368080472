use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use split_core::ValidationErrors;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExpenseServiceError>;

#[derive(Error, Debug)]
pub enum ExpenseServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(uuid::Uuid),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<split_core::Error> for ExpenseServiceError {
    fn from(err: split_core::Error) -> Self {
        match err {
            split_core::Error::Validation(errors) => ExpenseServiceError::Validation(errors),
        }
    }
}

impl From<validator::ValidationErrors> for ExpenseServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ExpenseServiceError::Validation(request_errors(&err))
    }
}

/// Convert request-level validator failures into split-core issues
pub fn request_errors(err: &validator::ValidationErrors) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (field, field_errors) in err.field_errors() {
        for e in field_errors {
            let message = e
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            errors.add("INVALID_FIELD", field, message);
        }
    }
    errors
}

impl ResponseError for ExpenseServiceError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        // Storage and internal failures are reported generically
        let message = match self {
            ExpenseServiceError::Database(_) | ExpenseServiceError::Internal(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        let mut body = json!({
            "success": false,
            "error": {
                "code": status_code.as_u16(),
                "message": message,
                "type": self.error_type()
            }
        });

        if let ExpenseServiceError::Validation(errors) = self {
            body["error"]["details"] = json!(errors.issues());
        }

        HttpResponse::build(status_code).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ExpenseServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ExpenseServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ExpenseServiceError::ExpenseNotFound(_) => StatusCode::NOT_FOUND,
            ExpenseServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ExpenseServiceError {
    fn error_type(&self) -> &str {
        match self {
            ExpenseServiceError::Database(_) => "database_error",
            ExpenseServiceError::Validation(_) => "validation_error",
            ExpenseServiceError::ExpenseNotFound(_) => "not_found",
            ExpenseServiceError::Internal(_) => "internal_error",
        }
    }
}
