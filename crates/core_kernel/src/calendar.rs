//! Calendar dates and month/year arithmetic
//!
//! Every value in this module is a whole day in UTC. There is no time-of-day
//! component, so comparisons never depend on the host timezone.
//!
//! Month addition follows native calendar rollover: a day that does not exist
//! in the target month spills forward into the next month
//! (`2023-01-31 + 1 month = 2023-03-03`). The one exception is the leap day,
//! which collapses to February 28 when it lands in a non-leap February, the
//! same way year subtraction treats it.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// Returns true if `year` is a Gregorian leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// A calendar day normalised to UTC midnight
///
/// Always represents a real calendar day: construction rejects impossible
/// combinations such as February 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from year, month (1-12) and day (1-31)
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidDate` if the month is outside 1-12 or the
    /// day exceeds the month's length in that year.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(CalendarError::invalid_date(year, month, day));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| CalendarError::invalid_date(year, month, day))
    }

    /// Wraps an existing chrono date
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date in UTC
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns true for February 29
    pub fn is_leap_day(&self) -> bool {
        self.month() == 2 && self.day() == 29
    }

    /// The instant this date starts, at 00:00:00 UTC
    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0.and_time(NaiveTime::MIN))
    }

    /// Adds `months` calendar months (negative values go backwards)
    ///
    /// Days past the end of the target month roll over into the following
    /// month; a leap day landing in a non-leap February becomes February 28.
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_kernel::CalendarDate;
    ///
    /// let date = CalendarDate::from_ymd(2023, 6, 30).unwrap();
    /// assert_eq!(date.add_months(6).unwrap(), CalendarDate::from_ymd(2023, 12, 30).unwrap());
    ///
    /// let end_of_january = CalendarDate::from_ymd(2023, 1, 31).unwrap();
    /// assert_eq!(end_of_january.add_months(1).unwrap(), CalendarDate::from_ymd(2023, 3, 3).unwrap());
    /// ```
    pub fn add_months(&self, months: i32) -> Result<Self, CalendarError> {
        let total = i64::from(self.year()) * 12 + i64::from(self.0.month0()) + i64::from(months);
        let year = i32::try_from(total.div_euclid(12)).map_err(|_| CalendarError::OutOfRange)?;
        // rem_euclid(12) is always in 0..12
        let month = total.rem_euclid(12) as u32 + 1;

        let last_day = days_in_month(year, month);
        if self.day() <= last_day {
            return Self::from_ymd(year, month, self.day()).map_err(|_| CalendarError::OutOfRange);
        }
        if self.is_leap_day() {
            return Self::from_ymd(year, 2, 28).map_err(|_| CalendarError::OutOfRange);
        }

        let first = Self::from_ymd(year, month, 1).map_err(|_| CalendarError::OutOfRange)?;
        first.add_days(i64::from(self.day() - 1))
    }

    /// Subtracts `years` whole years, keeping month and day
    ///
    /// February 29 becomes February 28 when the target year is not a leap year.
    pub fn subtract_years(&self, years: u32) -> Result<Self, CalendarError> {
        let years = i32::try_from(years).map_err(|_| CalendarError::OutOfRange)?;
        let year = self.year().checked_sub(years).ok_or(CalendarError::OutOfRange)?;
        let day = self.day().min(days_in_month(year, self.month()));
        Self::from_ymd(year, self.month(), day).map_err(|_| CalendarError::OutOfRange)
    }

    /// Adds (or, when negative, subtracts) a number of days
    pub fn add_days(&self, days: i64) -> Result<Self, CalendarError> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted.map(Self).ok_or(CalendarError::OutOfRange)
    }

    /// The following calendar day
    pub fn next_day(&self) -> Result<Self, CalendarError> {
        self.0.succ_opt().map(Self).ok_or(CalendarError::OutOfRange)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    /// Parses an ISO `YYYY-MM-DD` date
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.splitn(3, '-');
        let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CalendarError::unparseable(s));
        };

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || !all_digits(year) || !all_digits(month) || !all_digits(day) {
            return Err(CalendarError::unparseable(s));
        }

        let year: i32 = year.parse().map_err(|_| CalendarError::unparseable(s))?;
        let month: u32 = month.parse().map_err(|_| CalendarError::unparseable(s))?;
        let day: u32 = day.parse().map_err(|_| CalendarError::unparseable(s))?;

        Self::from_ymd(year, month, day)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> NaiveDate {
        date.0
    }
}

/// Constructs a UTC calendar date, rejecting impossible combinations
pub fn to_utc_date(year: i32, month: u32, day: u32) -> Result<CalendarDate, CalendarError> {
    CalendarDate::from_ymd(year, month, day)
}

/// Adds `months` calendar months to `date`
pub fn add_months(date: CalendarDate, months: i32) -> Result<CalendarDate, CalendarError> {
    date.add_months(months)
}

/// Subtracts `years` whole years from `date`
pub fn subtract_years(date: CalendarDate, years: u32) -> Result<CalendarDate, CalendarError> {
    date.subtract_years(years)
}
