//! Pre-built Test Fixtures
//!
//! Provides ready-to-use dates, claim periods, and engines. These fixtures are
//! consistent and predictable so expected outcomes can be worked out by hand.

use core_kernel::CalendarDate;
use domain_pnf::{ClaimDecisionEngine, ClaimPeriod, DecisionFlow};

/// Builds a date, panicking on impossible input (tests only)
pub fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd(year, month, day)
        .unwrap_or_else(|e| panic!("fixture date {}-{}-{} is invalid: {}", year, month, day, e))
}

/// Builds a claim period, panicking unless start < end (tests only)
pub fn period(start: CalendarDate, end: CalendarDate) -> ClaimPeriod {
    ClaimPeriod::new(start, end)
        .unwrap_or_else(|e| panic!("fixture period {} to {} is invalid: {}", start, end, e))
}

/// Fixture for notable dates
pub struct DateFixtures;

impl DateFixtures {
    /// Legal cutover date (April 1, 2023)
    pub fn cutover() -> CalendarDate {
        date(2023, 4, 1)
    }

    /// Day before the cutover
    pub fn day_before_cutover() -> CalendarDate {
        date(2023, 3, 31)
    }

    /// A leap day
    pub fn leap_day() -> CalendarDate {
        date(2024, 2, 29)
    }
}

/// Fixture for claim periods around the cutover
pub struct PeriodFixtures;

impl PeriodFixtures {
    /// Calendar year 2022; notification window 2022-01-01 to 2023-07-01
    pub fn pre_cutover_year() -> ClaimPeriod {
        period(date(2022, 1, 1), date(2022, 12, 31))
    }

    /// Starts the day before the cutover; notification window ends 2024-09-30
    pub fn transitional() -> ClaimPeriod {
        period(DateFixtures::day_before_cutover(), date(2024, 3, 30))
    }

    /// Starts on the cutover; notification window 2023-04-01 to 2024-10-01
    pub fn post_cutover() -> ClaimPeriod {
        period(DateFixtures::cutover(), date(2024, 3, 31))
    }

    /// Three-year claim; notification window 2021-01-01 to 2024-06-30
    pub fn window_ending_mid_2024() -> ClaimPeriod {
        period(date(2021, 1, 1), date(2023, 12, 30))
    }
}

/// Engine using the statutory cutover
pub fn standard_engine() -> ClaimDecisionEngine {
    ClaimDecisionEngine::with_cutover(DateFixtures::cutover())
}

/// Fresh walkthrough using [`standard_engine`]
pub fn standard_flow() -> DecisionFlow {
    DecisionFlow::new(standard_engine())
}
