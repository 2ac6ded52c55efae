use crate::domain::logger::{LogField, Severity};

/// Shape shared by every error that crosses a layer boundary.
///
/// The presentation layer renders any implementor into one log record plus a
/// terminal HTTP status without knowing the concrete error type.
pub trait StructuredError {
    fn status_code(&self) -> u16;
    fn severity(&self) -> Severity;
    fn message(&self) -> &str;
    fn fields(&self) -> Vec<LogField>;
}

/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.pool_acquire")]
    PoolAcquire { cause: String },
    #[error("repository.storage")]
    Storage {
        message: &'static str,
        severity: Severity,
        cause: String,
    },
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.mapping")]
    Mapping { message: &'static str, cause: String },
}

impl RepositoryError {
    pub fn pool_acquire(cause: impl ToString) -> Self {
        RepositoryError::PoolAcquire {
            cause: cause.to_string(),
        }
    }
    pub fn storage(message: &'static str, cause: impl ToString) -> Self {
        RepositoryError::Storage {
            message,
            severity: Severity::Error,
            cause: cause.to_string(),
        }
    }
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn mapping(message: &'static str, cause: impl ToString) -> Self {
        RepositoryError::Mapping {
            message,
            cause: cause.to_string(),
        }
    }

    /// Overrides the severity of a storage failure. Other variants keep theirs.
    pub fn with_severity(self, severity: Severity) -> Self {
        match self {
            RepositoryError::Storage { message, cause, .. } => RepositoryError::Storage {
                message,
                severity,
                cause,
            },
            other => other,
        }
    }
}

impl StructuredError for RepositoryError {
    fn status_code(&self) -> u16 {
        match self {
            RepositoryError::NotFound => 404,
            _ => 500,
        }
    }

    fn severity(&self) -> Severity {
        match self {
            RepositoryError::Storage { severity, .. } => *severity,
            RepositoryError::NotFound => Severity::Warn,
            RepositoryError::PoolAcquire { .. } | RepositoryError::Mapping { .. } => {
                Severity::Error
            }
        }
    }

    fn message(&self) -> &str {
        match self {
            RepositoryError::PoolAcquire { .. } => "failed to acquire connection",
            RepositoryError::Storage { message, .. } => *message,
            RepositoryError::NotFound => "invoice not found",
            RepositoryError::Mapping { message, .. } => *message,
        }
    }

    fn fields(&self) -> Vec<LogField> {
        match self {
            RepositoryError::PoolAcquire { cause }
            | RepositoryError::Storage { cause, .. }
            | RepositoryError::Mapping { cause, .. } => vec![LogField::new("error", cause.as_str())],
            RepositoryError::NotFound => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_not_found_to_404_warn() {
        let err = RepositoryError::not_found();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.severity(), Severity::Warn);
        assert_eq!(err.message(), "invoice not found");
        assert!(err.fields().is_empty());
    }

    #[test]
    fn should_map_pool_acquire_to_500_error_with_cause() {
        let err = RepositoryError::pool_acquire("pool timed out while waiting for an open connection");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.severity(), Severity::Error);
        assert_eq!(err.message(), "failed to acquire connection");
        assert_eq!(
            err.fields(),
            vec![LogField::new(
                "error",
                "pool timed out while waiting for an open connection"
            )]
        );
    }

    #[test]
    fn should_carry_storage_severity_override() {
        let err = RepositoryError::storage("failed to create invoice", "duplicate key")
            .with_severity(Severity::Warn);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.severity(), Severity::Warn);
        assert_eq!(err.message(), "failed to create invoice");
    }

    #[test]
    fn should_ignore_severity_override_outside_storage() {
        let err = RepositoryError::not_found().with_severity(Severity::Fatal);
        assert_eq!(err, RepositoryError::NotFound);
        assert_eq!(err.severity(), Severity::Warn);
    }

    #[test]
    fn should_report_mapping_errors_as_internal() {
        let err = RepositoryError::mapping("failed to collect invoices", "unknown status: LOST");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.severity(), Severity::Error);
        assert_eq!(err.to_string(), "repository.mapping");
    }
}
