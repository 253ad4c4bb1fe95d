//! Core Kernel - Foundational types for the prenotification decision engine
//!
//! This crate provides the building blocks the decision domain works on:
//! - Calendar dates normalised to UTC midnight
//! - Calendar-aware month and year arithmetic (leap years, month lengths)
//! - Time-ordered walkthrough identifiers

pub mod calendar;
pub mod identifiers;
pub mod error;

pub use calendar::{
    CalendarDate, to_utc_date, add_months, subtract_years, is_leap_year, days_in_month,
};
pub use identifiers::{WalkthroughId, FlowEventId};
pub use error::CalendarError;
