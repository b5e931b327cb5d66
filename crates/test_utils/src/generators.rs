//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data that
//! keeps domain invariants.

use chrono::{Duration, NaiveDate};
use domain_person::national_id::BLOCKLIST;
use domain_person::{complete_national_id, format_national_id};
use proptest::prelude::*;

/// Strategy for nine base digits of a CPF
pub fn national_id_base_strategy() -> impl Strategy<Value = [u32; 9]> {
    proptest::array::uniform9(0u32..10)
}

/// Strategy for valid, non-blocklisted CPFs as eleven bare digits
pub fn valid_national_id_strategy() -> impl Strategy<Value = String> {
    national_id_base_strategy()
        .prop_map(complete_national_id)
        .prop_filter("blocklisted", |id| !BLOCKLIST.contains(&id.as_str()))
}

/// Strategy for valid CPFs in the masked `ddd.ddd.ddd-dd` form
pub fn masked_national_id_strategy() -> impl Strategy<Value = String> {
    valid_national_id_strategy().prop_map(|id| format_national_id(&id))
}

/// Strategy for strings of ASCII digits
pub fn digit_string_strategy(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..10, 0..=max_len)
        .prop_map(|digits| digits.into_iter().map(|d| char::from(b'0' + d)).collect())
}

/// Strategy for free-form text mixing digits, separators and letters
pub fn noisy_input_strategy() -> impl Strategy<Value = String> {
    "[0-9.\\- a-zA-Z/]{0,24}"
}

/// Strategy for dates between 1900 and 2100
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..73_000).prop_map(|days| {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(days)
    })
}

/// Strategy for birth dates whose age on `today` lies in `min..=max`
pub fn birth_date_with_age_strategy(
    today: NaiveDate,
    min: i32,
    max: i32,
) -> impl Strategy<Value = NaiveDate> {
    // Youngest: turns `min` today. Oldest: turns `max + 1` tomorrow.
    let youngest = shift_years(today, -min);
    let oldest = shift_years(today, -(max + 1)) + Duration::days(1);
    let span = (youngest - oldest).num_days();
    (0..=span).prop_map(move |days| oldest + Duration::days(days))
}

fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = chrono::Datelike::year(&date) + years;
    chrono::Datelike::with_year(&date, year)
        // Feb 29 in a non-leap target year
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap()
}

/// Strategy for well-formed e-mail addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9._]{0,15}", "[a-z]{2,12}", "[a-z]{2,6}")
        .prop_map(|(local, domain, tld)| format!("{local}@{domain}.{tld}"))
}

/// Strategy for names made of allowed letters and single spaces
pub fn name_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[A-Za-záàâãéèêíïóôõöúçñ]{1,12}", 1..5)
        .prop_map(|parts| parts.join(" "))
}
