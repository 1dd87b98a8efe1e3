//! Core error types for the Estatefolio analytics engine.
//!
//! Missing or degenerate data is never an error here: metrics resolve to
//! `None` instead. These types cover structural integrity violations
//! (unsorted history, impossible monetary values) and failures reported by
//! the data-provider seam.

use chrono::{NaiveDate, ParseError as ChronoParseError};
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analytics engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Metrics calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised by metric calculations on structurally invalid input.
///
/// These indicate an upstream data-integrity bug, not an expected sparse-data
/// state. A property with no current estimate is normal; a valuation history
/// that is out of order is not.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Purchase price must be positive, got {0}")]
    NonPositivePurchasePrice(String),

    #[error("{kind} history is not ordered by date at {date}")]
    UnsortedHistory { kind: &'static str, date: NaiveDate },

    #[error("Calculation failed: {0}")]
    Calculation(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
