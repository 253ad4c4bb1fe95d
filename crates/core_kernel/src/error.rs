//! Core error types used across the system

use thiserror::Error;

/// Errors raised while constructing or deriving calendar dates
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// The year/month/day combination is not a real calendar day
    #[error("Invalid date: {year:04}-{month:02}-{day:02} is not a calendar day")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
    },

    /// The text is not shaped like an ISO date
    #[error("Unparseable date '{0}': expected YYYY-MM-DD")]
    Unparseable(String),

    /// Date arithmetic left the representable range
    #[error("Date arithmetic out of range")]
    OutOfRange,
}

impl CalendarError {
    pub fn invalid_date(year: i32, month: u32, day: u32) -> Self {
        CalendarError::InvalidDate { year, month, day }
    }

    pub fn unparseable(input: impl Into<String>) -> Self {
        CalendarError::Unparseable(input.into())
    }
}
