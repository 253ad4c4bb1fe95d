//! Unit tests for the calendar module
//!
//! Tests cover date construction, month/year arithmetic with its overflow
//! policy, parsing, and serialization.

use core_kernel::{
    add_months, days_in_month, subtract_years, to_utc_date, CalendarDate, CalendarError,
};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    to_utc_date(y, m, d).unwrap()
}

mod construction {
    use super::*;

    #[test]
    fn test_accepts_last_day_of_every_month() {
        for month in 1..=12 {
            let last = days_in_month(2023, month);
            assert!(to_utc_date(2023, month, last).is_ok(), "month {}", month);
            assert!(to_utc_date(2023, month, last + 1).is_err(), "month {}", month);
        }
    }

    #[test]
    fn test_february_depends_on_leap_year() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn test_thirty_day_months() {
        for month in [4, 6, 9, 11] {
            assert_eq!(days_in_month(2023, month), 30);
        }
    }

    #[test]
    fn test_invalid_date_error_carries_components() {
        let result = to_utc_date(2023, 2, 30);
        assert_eq!(
            result,
            Err(CalendarError::InvalidDate { year: 2023, month: 2, day: 30 })
        );
    }

    #[test]
    fn test_month_out_of_range() {
        assert!(matches!(to_utc_date(2023, 13, 1), Err(CalendarError::InvalidDate { .. })));
        assert!(matches!(to_utc_date(2023, 0, 1), Err(CalendarError::InvalidDate { .. })));
    }
}

mod month_arithmetic {
    use super::*;

    #[test]
    fn test_claim_notification_offset() {
        assert_eq!(add_months(date(2023, 6, 30), 6).unwrap(), date(2023, 12, 30));
    }

    #[test]
    fn test_year_boundary() {
        assert_eq!(add_months(date(2023, 9, 15), 6).unwrap(), date(2024, 3, 15));
        assert_eq!(add_months(date(2023, 12, 31), 1).unwrap(), date(2024, 1, 31));
    }

    #[test]
    fn test_leap_day_plus_twelve_months() {
        assert_eq!(add_months(date(2024, 2, 29), 12).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_end_of_month_rolls_forward_not_clamped() {
        // August 31 + 6 months has no February 31
        assert_eq!(add_months(date(2022, 8, 31), 6).unwrap(), date(2023, 3, 3));
        assert_eq!(add_months(date(2023, 3, 31), 6).unwrap(), date(2023, 10, 1));
        assert_eq!(add_months(date(2023, 5, 31), 1).unwrap(), date(2023, 7, 1));
    }

    #[test]
    fn test_zero_months_is_identity() {
        let d = date(2023, 1, 31);
        assert_eq!(add_months(d, 0).unwrap(), d);
    }

    #[test]
    fn test_backwards() {
        assert_eq!(add_months(date(2024, 1, 15), -13).unwrap(), date(2022, 12, 15));
    }

    #[test]
    fn test_out_of_range() {
        let far = CalendarDate::from_naive(chrono::NaiveDate::MAX);
        assert_eq!(add_months(far, 1), Err(CalendarError::OutOfRange));
    }
}

mod year_arithmetic {
    use super::*;

    #[test]
    fn test_same_month_and_day() {
        assert_eq!(subtract_years(date(2024, 6, 30), 3).unwrap(), date(2021, 6, 30));
    }

    #[test]
    fn test_leap_day_collapses() {
        assert_eq!(subtract_years(date(2024, 2, 29), 3).unwrap(), date(2021, 2, 28));
    }

    #[test]
    fn test_window_floor_is_day_after() {
        let floor = subtract_years(date(2024, 6, 30), 3).unwrap().next_day().unwrap();
        assert_eq!(floor, date(2021, 7, 1));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parses_iso_dates() {
        assert_eq!("2023-04-01".parse::<CalendarDate>().unwrap(), date(2023, 4, 1));
        assert_eq!(" 2024-02-29 ".parse::<CalendarDate>().unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_shape_errors_are_unparseable() {
        for input in ["", "2023/04/01", "01-04-2023", "2023-04", "20230401", "2023-0a-01"] {
            assert!(
                matches!(input.parse::<CalendarDate>(), Err(CalendarError::Unparseable(_))),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_impossible_day_is_invalid_date() {
        assert!(matches!(
            "2023-02-29".parse::<CalendarDate>(),
            Err(CalendarError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_json_roundtrip_uses_iso_format() {
        let d = date(2023, 4, 1);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2023-04-01\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_json_rejects_impossible_date() {
        assert!(serde_json::from_str::<CalendarDate>("\"2023-02-30\"").is_err());
    }
}

mod properties {
    use super::*;

    fn any_date() -> impl Strategy<Value = CalendarDate> {
        (1900i32..2200, 1u32..=12, 1u32..=31).prop_filter_map("real calendar day", |(y, m, d)| {
            to_utc_date(y, m, d).ok()
        })
    }

    proptest! {
        #[test]
        fn prop_add_months_never_moves_backwards(d in any_date(), n in 0i32..240) {
            prop_assert!(add_months(d, n).unwrap() >= d);
        }

        #[test]
        fn prop_add_months_lands_within_three_days_of_target_month(d in any_date(), n in 0i32..240) {
            let result = add_months(d, n).unwrap();
            let target_index = i64::from(d.year()) * 12 + i64::from(d.month()) - 1 + i64::from(n);
            let result_index = i64::from(result.year()) * 12 + i64::from(result.month()) - 1;
            prop_assert!(result_index == target_index || result_index == target_index + 1);
            if result_index == target_index + 1 {
                prop_assert!(result.day() <= 3);
            }
        }

        #[test]
        fn prop_subtract_years_keeps_month(d in any_date(), n in 0u32..100) {
            let result = subtract_years(d, n).unwrap();
            prop_assert_eq!(result.month(), d.month());
            prop_assert_eq!(result.year(), d.year() - n as i32);
            prop_assert!(result.day() == d.day() || (d.is_leap_day() && result.day() == 28));
        }

        #[test]
        fn prop_display_parse_roundtrip(d in any_date()) {
            prop_assert_eq!(d.to_string().parse::<CalendarDate>().unwrap(), d);
        }
    }
}
