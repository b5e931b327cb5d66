//! Age calculation and the registration age policy

use chrono::{Datelike, NaiveDate};

use crate::validation::FieldError;

/// Youngest age accepted for registration
pub const MINIMUM_AGE: i32 = 16;

/// Oldest age accepted for registration
pub const MAXIMUM_AGE: i32 = 100;

/// Calculates age in whole years on `today`.
///
/// The age goes up on the anniversary of the birth month and day. Someone
/// born on February 29 turns a year older on March 1 in non-leap years.
/// Birth dates after `today` give zero or a negative age.
pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();

    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }

    age
}

/// Inclusive age bounds for registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgePolicy {
    pub minimum: i32,
    pub maximum: i32,
}

impl Default for AgePolicy {
    fn default() -> Self {
        Self {
            minimum: MINIMUM_AGE,
            maximum: MAXIMUM_AGE,
        }
    }
}

impl AgePolicy {
    /// Checks a birth date against the bounds.
    ///
    /// # Returns
    ///
    /// The age on `today` when it lies within the bounds, otherwise the
    /// field error to report for the birth date.
    pub fn check(
        &self,
        birth_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<i32, FieldError> {
        let birth_date = birth_date.ok_or(FieldError::BirthDateRequired)?;
        let age = calculate_age(birth_date, today);

        if age < self.minimum {
            return Err(FieldError::BelowMinimumAge { minimum: self.minimum });
        }

        if age > self.maximum {
            return Err(FieldError::AboveMaximumAge { maximum: self.maximum });
        }

        Ok(age)
    }
}

/// Checks a birth date against the default bounds of 16 to 100 years
pub fn validate_age(birth_date: Option<NaiveDate>, today: NaiveDate) -> Result<i32, FieldError> {
    AgePolicy::default().check(birth_date, today)
}
