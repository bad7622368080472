//! Error types for split core

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Result type for split core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Split core errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed expense or split specification; carries every violation found
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

impl Error {
    /// Violations behind a validation failure
    pub fn validation_errors(&self) -> &ValidationErrors {
        match self {
            Error::Validation(errors) => errors,
        }
    }
}
