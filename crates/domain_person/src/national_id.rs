//! National ID (CPF) checksum validation
//!
//! An ID is eleven digits: nine base digits followed by two check digits.
//! Each check digit is derived from the digits before it by a weighted sum
//! modulo 11, with weights counting down to 2:
//!
//! ```text
//! digit = 11 - (sum mod 11), and 0 when that is 10 or 11
//! ```
//!
//! A small set of sequences is rejected outright even though some of them
//! satisfy the checksum.

use thiserror::Error;

use crate::formatting::{digits_only, NATIONAL_ID_DIGITS};

/// Sequences that are never valid national IDs.
///
/// The repeated-digit sequences all satisfy the checksum, and so does
/// `12345678909`, which is commonly typed as a placeholder.
pub const BLOCKLIST: [&str; 11] = [
    "12345678909",
    "00000000000",
    "11111111111",
    "22222222222",
    "33333333333",
    "44444444444",
    "55555555555",
    "66666666666",
    "77777777777",
    "88888888888",
    "99999999999",
];

/// Why a national ID was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NationalIdError {
    /// Wrong number of digits after stripping separators
    #[error("expected 11 digits, found {found}")]
    WrongLength { found: usize },

    /// The sequence is on the blocklist
    #[error("blocklisted sequence")]
    Blocklisted,

    /// A check digit does not match
    #[error("check digit {position} is {found}, expected {expected}")]
    ChecksumMismatch {
        position: usize,
        expected: u32,
        found: u32,
    },
}

/// Computes the check digit for `prefix`.
///
/// Weights run from `prefix.len() + 1` down to 2.
fn check_digit(prefix: &[u32]) -> u32 {
    let top = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .zip((2..=top).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    let digit = 11 - sum % 11;
    if digit >= 10 { 0 } else { digit }
}

/// Checks a national ID, reporting the first rule it breaks.
///
/// Separators and any other non-digit characters are ignored.
pub fn check_national_id(raw: &str) -> Result<(), NationalIdError> {
    let cleaned = digits_only(raw);
    if cleaned.len() != NATIONAL_ID_DIGITS {
        return Err(NationalIdError::WrongLength { found: cleaned.len() });
    }

    if BLOCKLIST.contains(&cleaned.as_str()) {
        return Err(NationalIdError::Blocklisted);
    }

    let digits: Vec<u32> = cleaned.chars().filter_map(|c| c.to_digit(10)).collect();

    for position in [9, 10] {
        let expected = check_digit(&digits[..position]);
        if digits[position] != expected {
            return Err(NationalIdError::ChecksumMismatch {
                position,
                expected,
                found: digits[position],
            });
        }
    }

    Ok(())
}

/// Returns true if `raw` holds a valid national ID.
///
/// ```
/// use domain_person::national_id::validate_national_id;
///
/// assert!(validate_national_id("529.982.247-25"));
/// assert!(!validate_national_id("11111111111"));
/// ```
pub fn validate_national_id(raw: &str) -> bool {
    check_national_id(raw).is_ok()
}

/// Appends both check digits to nine base digits.
///
/// The result satisfies the checksum but may still be blocklisted.
pub fn complete_national_id(base: [u32; 9]) -> String {
    let mut digits = base.to_vec();
    digits.push(check_digit(&digits));
    digits.push(check_digit(&digits));
    digits.iter().map(|d| char::from(b'0' + (*d % 10) as u8)).collect()
}
