//! Error types for currency and money construction.

use thiserror::Error;

/// Errors raised while building currencies and money amounts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Malformed literal, non-numeric amount or otherwise unusable argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The currency has no explicit precision and none in the precision table.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

impl MoneyError {
    /// Shorthand for an [`MoneyError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        MoneyError::InvalidArgument(message.into())
    }

    /// Get a stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            MoneyError::InvalidArgument(_) => "INVALID_ARGUMENT",
            MoneyError::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
        }
    }
}

/// Result type alias for money operations.
pub type MoneyResult<T> = std::result::Result<T, MoneyError>;
