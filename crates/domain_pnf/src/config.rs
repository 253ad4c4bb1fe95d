//! Engine configuration
//!
//! The cutover date is passed to the engine explicitly instead of living in a
//! global, so alternate legal regimes can be evaluated side by side.

use serde::{Deserialize, Serialize};

use core_kernel::CalendarDate;
use crate::error::PnfError;

/// Year of the legal transition date (April 1, 2023)
pub const CUTOVER_YEAR: i32 = 2023;
/// Month of the legal transition date
pub const CUTOVER_MONTH: u32 = 4;
/// Day of the legal transition date
pub const CUTOVER_DAY: u32 = 1;

/// Months added to a claim period's end to close its notification window
pub const DEFAULT_NOTIFICATION_EXTENSION_MONTHS: u32 = 6;
/// How far back a filing can lie and still be relevant
pub const DEFAULT_RELEVANCE_LOOKBACK_YEARS: u32 = 3;

/// Configuration for [`crate::ClaimDecisionEngine`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Legal transition date separating old- and new-regime rules
    pub cutover_date: Option<CalendarDate>,
    /// Calendar months between a claim period's end and its notification window's end
    pub notification_extension_months: u32,
    /// Relevance window, in years, for historical filings
    pub relevance_lookback_years: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cutover_date: CalendarDate::from_ymd(CUTOVER_YEAR, CUTOVER_MONTH, CUTOVER_DAY).ok(),
            notification_extension_months: DEFAULT_NOTIFICATION_EXTENSION_MONTHS,
            relevance_lookback_years: DEFAULT_RELEVANCE_LOOKBACK_YEARS,
        }
    }
}

impl EngineConfig {
    /// Overrides the cutover date
    pub fn with_cutover(mut self, cutover: CalendarDate) -> Self {
        self.cutover_date = Some(cutover);
        self
    }

    /// Checks that every setting the engine relies on is present
    ///
    /// # Errors
    ///
    /// Returns `PnfError::Configuration` if the cutover date is unset, a
    /// window length is zero, or the extension exceeds what month arithmetic
    /// accepts.
    pub fn validate(&self) -> Result<CalendarDate, PnfError> {
        let cutover = self
            .cutover_date
            .ok_or_else(|| PnfError::configuration("cutover date is not set"))?;
        if self.notification_extension_months == 0 {
            return Err(PnfError::configuration("notification extension must be at least one month"));
        }
        if i32::try_from(self.notification_extension_months).is_err() {
            return Err(PnfError::configuration("notification extension does not fit in a month count"));
        }
        if self.relevance_lookback_years == 0 {
            return Err(PnfError::configuration("relevance lookback must be at least one year"));
        }
        Ok(cutover)
    }
}
