//! Calculation error types
//!
//! The arithmetic itself never fails: out-of-range instants degrade to
//! boundary values. Errors only arise when a calendar boundary cannot be
//! represented as an instant in the clock's time zone.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur while resolving calendar boundaries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// The calendar date is outside the representable range
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// The wall-clock time falls in a time zone gap that could not be resolved
    #[error("Local time does not exist in this time zone: {0}")]
    NonexistentLocalTime(NaiveDateTime),
}

/// Result type alias for calculations
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalcError::InvalidDate {
            year: 2026,
            month: 2,
            day: 30,
        };
        assert_eq!(err.to_string(), "Invalid date: 2026-02-30");
    }
}
