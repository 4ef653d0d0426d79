//! Error types for the fcs-app service layer.

use std::path::PathBuf;

use fcs_schema::{SchemaError, ValidationError};
use fcs_sizing::SizingError;
use fcs_store::StoreError;

/// Application error shared by the CLI and the HTTP server.
///
/// `Validation` and `NotFound` are caused by the caller; everything else is
/// an internal failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Catalog file error: {0}")]
    Catalog(String),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fcs-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        AppError::Validation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }

    pub fn not_found(what: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            what,
            id: id.to_string(),
        }
    }

    /// True for errors the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Validation { .. } | AppError::NotFound { .. })
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation {
            field: err.field().map(str::to_string),
            message: err.to_string(),
        }
    }
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Validation(v) => v.into(),
            other => AppError::Catalog(other.to_string()),
        }
    }
}

/// Every engine failure traces back to the inputs or the chosen model, so all
/// of them are the caller's to fix.
impl From<SizingError> for AppError {
    fn from(err: SizingError) -> Self {
        match err {
            SizingError::Validation(v) => v.into(),
            SizingError::NonFinite { what, .. } => AppError::Validation {
                message: format!(
                    "Inputs are out of range: {what} cannot be computed as a finite number"
                ),
                field: Some(what.to_string()),
            },
            SizingError::NonPhysical { .. } => AppError::Validation {
                message: err.to_string(),
                field: None,
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { name } => ValidationError::DuplicateEntry {
                id: name,
                context: "fuel-cell catalog".to_string(),
            }
            .into(),
            other => AppError::Store(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_keeps_field() {
        let err: AppError = ValidationError::MissingField { field: "loadKw" }.into();
        match &err {
            AppError::Validation { field, message } => {
                assert_eq!(field.as_deref(), Some("loadKw"));
                assert!(message.contains("loadKw"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(err.is_client_error());
    }

    #[test]
    fn sizing_validation_stays_validation() {
        let err: AppError = SizingError::Validation(ValidationError::MissingField {
            field: "systemVoltage",
        })
        .into();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn overflowing_results_are_validation() {
        let err: AppError = SizingError::NonFinite {
            what: "dgLoadFactor",
            value: f64::INFINITY,
        }
        .into();
        match &err {
            AppError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("dgLoadFactor")),
            other => panic!("unexpected: {other:?}"),
        }

        let err: AppError = SizingError::NonPhysical {
            what: "stack count exceeds the countable range",
        }
        .into();
        assert!(err.is_client_error());
    }

    #[test]
    fn duplicate_store_rows_are_validation() {
        let err: AppError = StoreError::Duplicate {
            name: "Ballard FCgen-H2PM".to_string(),
        }
        .into();
        match &err {
            AppError::Validation { field, message } => {
                assert!(field.is_none());
                assert!(message.contains("Ballard FCgen-H2PM"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn store_errors_are_internal() {
        let err: AppError = StoreError::Poisoned { what: "x" }.into();
        assert!(!err.is_client_error());
    }

    #[test]
    fn not_found_message() {
        let err = AppError::not_found("Fuel cell", 9);
        assert_eq!(err.to_string(), "Fuel cell not found: 9");
    }
}
