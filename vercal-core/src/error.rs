//! Error types for vercal.

use thiserror::Error;

/// Errors that can occur while generating a calendar.
#[derive(Error, Debug)]
pub enum VercalError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid clock time '{0}': expected HH:MM")]
    InvalidClock(String),

    #[error("Unrecognized weekday '{0}': expected one of mon/tue/wed/thu/fri/sat/sun")]
    InvalidWeekday(String),

    #[error("Invalid recurrence rule in row {row}: {reason}")]
    InvalidRule { row: usize, reason: String },

    #[error("Row {row} is missing required field '{field}'")]
    MissingField { row: usize, field: String },

    #[error("Invalid hour range {start}-{end}: need start < end <= 24")]
    InvalidHourRange { start: u32, end: u32 },

    #[error("Font could not be loaded: {0}")]
    FontLoad(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for vercal operations.
pub type VercalResult<T> = Result<T, VercalError>;
