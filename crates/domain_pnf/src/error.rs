//! Prenotification domain errors

use thiserror::Error;

use core_kernel::CalendarError;
use crate::flow::Question;

/// How a caller should react to an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Correctable input; stay on the current question and ask again
    Validation,
    /// Contract violation; the walkthrough cannot proceed
    Fatal,
}

/// Errors that can occur in the prenotification domain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PnfError {
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] CalendarError),

    #[error("Invalid claim period: start {start} must be before end {end}")]
    InvalidPeriod { start: String, end: String },

    #[error("No answer supplied for question {0}")]
    MissingAnswer(Question),

    #[error("Answer {answer} does not belong to question {question}")]
    UnexpectedAnswer { question: Question, answer: String },

    #[error("Walkthrough already reached a verdict")]
    FlowComplete,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PnfError {
    pub fn configuration(message: impl Into<String>) -> Self {
        PnfError::Configuration(message.into())
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Arithmetic on dates the user already supplied ran off the calendar
            PnfError::InvalidDate(CalendarError::OutOfRange) => ErrorSeverity::Fatal,
            PnfError::InvalidDate(_) | PnfError::InvalidPeriod { .. } | PnfError::MissingAnswer(_) => {
                ErrorSeverity::Validation
            }
            PnfError::UnexpectedAnswer { .. } | PnfError::FlowComplete | PnfError::Configuration(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    /// Returns true if re-entering the answer can resolve the error
    pub fn is_recoverable(&self) -> bool {
        self.severity() == ErrorSeverity::Validation
    }
}
