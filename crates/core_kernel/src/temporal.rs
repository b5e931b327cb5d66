//! Calendar helpers
//!
//! Birth dates are plain calendar dates with no time component, so the
//! registry works exclusively with `NaiveDate`. What "today" means is
//! supplied by a [`Clock`], which lets services and tests pin the date.

use chrono::{Local, NaiveDate};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
    },
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`), the format produced by
/// HTML date inputs.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| TemporalError::InvalidDate {
        input: input.to_string(),
    })
}

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    /// Returns today's date
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2000-06-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2000, 6, 15).unwrap());
    }

    #[test]
    fn test_parse_iso_date_trims_whitespace() {
        assert!(parse_iso_date(" 2000-06-15 ").is_ok());
    }

    #[test]
    fn test_parse_iso_date_rejects_impossible_dates() {
        assert!(matches!(
            parse_iso_date("2023-02-29"),
            Err(TemporalError::InvalidDate { .. })
        ));
        assert!(parse_iso_date("15/06/2000").is_err());
        assert!(parse_iso_date("").is_err());
    }

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(FixedClock::new(date).today(), date);
    }
}
