//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating dates and claim periods that
//! maintain domain invariants.

use core_kernel::CalendarDate;
use domain_pnf::ClaimPeriod;
use proptest::prelude::*;

/// Strategy for real calendar days between 2000 and 2040
pub fn calendar_date_strategy() -> impl Strategy<Value = CalendarDate> {
    (2000i32..2040, 1u32..=12, 1u32..=31)
        .prop_filter_map("real calendar day", |(y, m, d)| CalendarDate::from_ymd(y, m, d).ok())
}

/// Strategy for claim periods of 1 to 730 days
pub fn claim_period_strategy() -> impl Strategy<Value = ClaimPeriod> {
    (calendar_date_strategy(), 1i64..=730).prop_filter_map("valid period", |(start, days)| {
        let end = start.add_days(days).ok()?;
        ClaimPeriod::new(start, end).ok()
    })
}

/// Strategy for dates within `days` of `anchor`, either side
pub fn date_near(anchor: CalendarDate, days: i64) -> impl Strategy<Value = CalendarDate> {
    (-days..=days).prop_filter_map("in range", move |offset| anchor.add_days(offset).ok())
}
