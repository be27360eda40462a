//! Error types for groupwise-polars

use groupwise_core::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Core(#[from] groupwise_core::Error),

    #[error("Type mismatch in column '{column}': expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: String,
        got: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for groupwise_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Polars(e) => DataError::Table(e.to_string()).into(),
            Error::Csv(e) => DataError::Table(e.to_string()).into(),
            Error::Io(e) => groupwise_core::Error::Io(e),
            Error::Data(e) => e.into(),
            Error::Core(e) => e,
            Error::TypeMismatch { column, .. } => DataError::NonNumericColumn(column).into(),
            Error::InvalidParameter(msg) => groupwise_core::Error::InvalidInput(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_becomes_data_error() {
        let err: groupwise_core::Error = Error::TypeMismatch {
            column: "Value".into(),
            expected: "numeric".into(),
            got: "String".into(),
        }
        .into();
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "data error: column 'Value' is not numeric");
    }

    #[test]
    fn test_parameter_error_is_not_fatal() {
        let err: groupwise_core::Error = Error::InvalidParameter("k must be positive".into()).into();
        assert!(!err.is_fatal());
    }
}
