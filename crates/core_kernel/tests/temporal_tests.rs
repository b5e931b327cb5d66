//! Unit tests for the Temporal module
//!
//! Tests cover ISO date parsing and the injectable clocks.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use core_kernel::temporal::TemporalError;
use core_kernel::{parse_iso_date, Clock, FixedClock, SystemClock};

mod parsing {
    use super::*;

    #[test]
    fn test_parses_calendar_dates() {
        assert_eq!(
            parse_iso_date("2000-06-15").unwrap(),
            NaiveDate::from_ymd_opt(2000, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_accepts_leap_day_only_in_leap_years() {
        assert!(parse_iso_date("2024-02-29").is_ok());
        assert!(parse_iso_date("2023-02-29").is_err());
        assert!(parse_iso_date("1900-02-29").is_err());
        assert!(parse_iso_date("2000-02-29").is_ok());
    }

    #[test]
    fn test_rejects_other_layouts() {
        for input in ["15/06/2000", "2000/06/15", "20000615", "", "   "] {
            assert!(
                matches!(parse_iso_date(input), Err(TemporalError::InvalidDate { .. })),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn test_error_keeps_input() {
        let error = parse_iso_date("2000-13-01").unwrap_err();
        assert!(error.to_string().contains("2000-13-01"));
    }
}

mod clocks {
    use super::*;

    #[test]
    fn test_fixed_clock_is_shareable_as_trait_object() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(date));
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_system_clock_uses_local_date() {
        let before = Local::now().date_naive();
        let today = SystemClock.today();
        let after = Local::now().date_naive();

        assert!(before <= today && today <= after);
        assert!(today.year() >= 2024);
    }
}
