//! Error types for sizing calculations.

use fcs_core::CoreError;
use fcs_schema::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Non-finite result for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type SizingResult<T> = Result<T, SizingError>;

impl From<CoreError> for SizingError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, value } => SizingError::NonFinite { what, value },
            CoreError::InvalidId { .. } => SizingError::NonPhysical { what: "record id" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SizingError::NonPhysical {
            what: "stack capacity",
        };
        assert!(err.to_string().contains("stack capacity"));
    }

    #[test]
    fn validation_is_transparent() {
        let err: SizingError = ValidationError::MissingField { field: "loadKw" }.into();
        assert_eq!(err.to_string(), "Missing required field: loadKw");
    }

    #[test]
    fn core_error_conversion() {
        let err: SizingError = CoreError::NonFinite {
            what: "x",
            value: f64::INFINITY,
        }
        .into();
        assert!(matches!(err, SizingError::NonFinite { what: "x", .. }));
    }
}
