//! Claim periods and their derived notification windows

use serde::{Deserialize, Serialize};

use core_kernel::CalendarDate;
use crate::error::PnfError;

/// Start and end dates bounding the claim being evaluated
///
/// The start is always strictly before the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawClaimPeriod")]
pub struct ClaimPeriod {
    start: CalendarDate,
    end: CalendarDate,
}

#[derive(Deserialize)]
struct RawClaimPeriod {
    start: CalendarDate,
    end: CalendarDate,
}

impl TryFrom<RawClaimPeriod> for ClaimPeriod {
    type Error = PnfError;

    fn try_from(raw: RawClaimPeriod) -> Result<Self, Self::Error> {
        ClaimPeriod::new(raw.start, raw.end)
    }
}

impl ClaimPeriod {
    /// Creates a claim period
    ///
    /// # Errors
    ///
    /// Returns `PnfError::InvalidPeriod` unless `start < end`.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, PnfError> {
        if start >= end {
            return Err(invalid_period(start, end));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> CalendarDate {
        self.start
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns true if the claim period began before `date`
    pub fn starts_before(&self, date: CalendarDate) -> bool {
        self.start < date
    }
}

/// Claim Notification Period (CNP)
///
/// Derived from a [`ClaimPeriod`]: it opens on the claim period's first day and
/// closes a fixed number of calendar months after the claim period ends. Both
/// edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClaimNotificationPeriod {
    start: CalendarDate,
    end: CalendarDate,
}

impl ClaimNotificationPeriod {
    /// Derives the notification window for `period`
    ///
    /// # Errors
    ///
    /// Returns `PnfError::Configuration` if the window end cannot be
    /// represented. The claim period is already valid, so this is never
    /// something the user can correct.
    pub fn derive(period: &ClaimPeriod, extension_months: u32) -> Result<Self, PnfError> {
        let months = i32::try_from(extension_months)
            .map_err(|_| PnfError::configuration("notification extension does not fit in a month count"))?;
        let end = period
            .end()
            .add_months(months)
            .map_err(|e| PnfError::configuration(format!("cannot derive notification period: {}", e)))?;
        Self::from_bounds(period.start(), end)
    }

    /// Builds a window from explicit bounds
    ///
    /// # Errors
    ///
    /// Returns `PnfError::InvalidPeriod` unless `start < end`.
    pub fn from_bounds(start: CalendarDate, end: CalendarDate) -> Result<Self, PnfError> {
        if start >= end {
            return Err(invalid_period(start, end));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> CalendarDate {
        self.start
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns true if `date` falls inside the window, edges included
    pub fn contains(&self, date: CalendarDate) -> bool {
        date >= self.start && date <= self.end
    }
}

fn invalid_period(start: CalendarDate, end: CalendarDate) -> PnfError {
    PnfError::InvalidPeriod {
        start: start.to_string(),
        end: end.to_string(),
    }
}
