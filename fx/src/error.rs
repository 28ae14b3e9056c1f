//! FX error types.

use coinage_common::{Currency, CurrencyPair, MoneyError};
use thiserror::Error;

/// Errors that can occur while building rates or exchanging money.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FxError {
    /// Malformed literal, zero rate or otherwise unusable argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A currency code has no precision in the default table.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Money handed to a rate is in neither of the rate's currencies.
    #[error("Exchange expected {from} or {to}, but {actual} received")]
    CurrencyMismatch {
        from: Currency,
        to: Currency,
        actual: Currency,
    },

    /// No forward or reverse rate is registered for the pair.
    #[error("Exchange rate between {} and {} is unknown", .0.source, .0.target)]
    RateNotFound(CurrencyPair),
}

/// Broad classification of an [`FxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    UnknownCurrency,
    ExchangeRateNotFound,
}

impl FxError {
    /// Get the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FxError::InvalidArgument(_) | FxError::CurrencyMismatch { .. } => {
                ErrorKind::InvalidArgument
            }
            FxError::UnknownCurrency(_) => ErrorKind::UnknownCurrency,
            FxError::RateNotFound(_) => ErrorKind::ExchangeRateNotFound,
        }
    }

    /// Get a stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            FxError::InvalidArgument(_) => "INVALID_ARGUMENT",
            FxError::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            FxError::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            FxError::RateNotFound(_) => "EXCHANGE_RATE_NOT_FOUND",
        }
    }
}

impl From<MoneyError> for FxError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::InvalidArgument(message) => FxError::InvalidArgument(message),
            MoneyError::UnknownCurrency(message) => FxError::UnknownCurrency(message),
        }
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
