//! Error types for recordsql

use thiserror::Error;

/// Result type alias for recordsql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while constructing a statement.
///
/// Rendering itself never fails; a builder records the first error it hits
/// and the terminal `render` call hands it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// Malformed identifier, incompatible operand types or a missing clause
    #[error("Validation error: {0}")]
    Validation(String),

    /// Clause combination that cannot be expressed for the statement kind
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl SqlError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unsupported operation error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an unsupported operation error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind() {
        let err = SqlError::validation("INSERT requires VALUES");
        assert_eq!(err.to_string(), "Validation error: INSERT requires VALUES");
        assert!(err.is_validation());

        let err = SqlError::unsupported("ON CONFLICT on SELECT");
        assert_eq!(err.to_string(), "Unsupported operation: ON CONFLICT on SELECT");
        assert!(err.is_unsupported());
    }
}
