//! Core error types for Quiver.

use thiserror::Error;

/// Result type alias using `QuiverError`.
pub type QuiverResult<T> = std::result::Result<T, QuiverError>;

/// Core error type for Quiver operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuiverError {
    /// Type mismatch or invalid type operation.
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Invalid value provided.
    #[error("ValueError: {0}")]
    ValueError(String),

    /// Schema-related error.
    #[error("SchemaError: {0}")]
    SchemaError(String),

    /// Column not found in a dataset.
    #[error("ColumnNotFound: {0}")]
    ColumnNotFound(String),

    /// Expression evaluation error.
    #[error("ExecutionError: {0}")]
    ExecutionError(String),

    /// Operation is not implemented (or deliberately unsupported).
    #[error("NotImplemented: {0}")]
    NotImplemented(String),

    /// Internal error (bug in Quiver).
    #[error("InternalError: {0}")]
    InternalError(String),

    /// Arrow error.
    #[error("ArrowError: {0}")]
    ArrowError(#[from] arrow_schema::ArrowError),

    /// Invalid parameter provided.
    #[error("InvalidParameter: {0}")]
    InvalidParameter(String),
}

impl QuiverError {
    /// Create a new `TypeError`.
    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a new `ValueError`.
    pub fn value_error<S: Into<String>>(msg: S) -> Self {
        Self::ValueError(msg.into())
    }

    /// Create a new `SchemaError`.
    pub fn schema_error<S: Into<String>>(msg: S) -> Self {
        Self::SchemaError(msg.into())
    }

    /// Create a new `ColumnNotFound` error.
    pub fn column_not_found<S: Into<String>>(name: S) -> Self {
        Self::ColumnNotFound(name.into())
    }

    /// Create a new `NotImplemented` error.
    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Error for an operator that is rejected for the given operand shapes.
    pub fn unsupported_operator<S: Into<String>>(op: S) -> Self {
        Self::NotImplemented(format!("unsupported operator: {}", op.into()))
    }

    /// Create a new `InternalError`.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }

    /// Create a new `ExecutionError`.
    pub fn execution<S: Into<String>>(msg: S) -> Self {
        Self::ExecutionError(msg.into())
    }

    /// Create a new `InvalidParameter` error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Whether this error marks an unsupported or unimplemented operation.
    pub const fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuiverError::type_error("expected Int64, got String");
        assert_eq!(err.to_string(), "TypeError: expected Int64, got String");
    }

    #[test]
    fn test_unsupported_operator() {
        let err = QuiverError::unsupported_operator("Expr - Selector");
        assert!(err.is_not_implemented());
        assert_eq!(
            err.to_string(),
            "NotImplemented: unsupported operator: Expr - Selector"
        );
    }

    #[test]
    fn test_arrow_error_conversion() {
        let err: QuiverError =
            arrow_schema::ArrowError::ComputeError("overflow".to_string()).into();
        assert!(matches!(err, QuiverError::ArrowError(_)));
    }
}
