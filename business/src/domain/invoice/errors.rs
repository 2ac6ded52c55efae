use crate::domain::errors::{RepositoryError, StructuredError};
use crate::domain::logger::{LogField, Severity};

use super::validation::FieldViolation;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvoiceError {
    #[error("invoice.invalid_input")]
    InvalidInput(Vec<FieldViolation>),
    #[error("invoice.not_found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl StructuredError for InvoiceError {
    fn status_code(&self) -> u16 {
        match self {
            InvoiceError::InvalidInput(_) => 400,
            InvoiceError::NotFound => 404,
            InvoiceError::Repository(err) => err.status_code(),
        }
    }

    fn severity(&self) -> Severity {
        match self {
            InvoiceError::InvalidInput(_) | InvoiceError::NotFound => Severity::Warn,
            InvoiceError::Repository(err) => err.severity(),
        }
    }

    fn message(&self) -> &str {
        match self {
            InvoiceError::InvalidInput(_) => "invalid request",
            InvoiceError::NotFound => "invoice not found",
            InvoiceError::Repository(err) => err.message(),
        }
    }

    fn fields(&self) -> Vec<LogField> {
        match self {
            InvoiceError::InvalidInput(violations) => violations
                .iter()
                .map(|violation| LogField::new("violation", violation.to_string()))
                .collect(),
            InvoiceError::NotFound => Vec::new(),
            InvoiceError::Repository(err) => err.fields(),
        }
    }
}
