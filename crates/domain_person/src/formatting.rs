//! Masked display formatting
//!
//! Both formatters strip everything but ASCII digits and re-insert the mask
//! separators once a complete code is present. Incomplete input comes back
//! as bare digits. Digits beyond a complete code are kept, unmasked, after
//! it; callers cap raw input length before formatting.
//!
//! Both functions are idempotent: formatting their own output yields the
//! same string.

/// Digits in a national ID number
pub const NATIONAL_ID_DIGITS: usize = 11;

/// Digits in a postal code
pub const POSTAL_CODE_DIGITS: usize = 8;

/// Returns only the ASCII digits of `raw`, in order
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Formats a national ID as `ddd.ddd.ddd-dd`.
///
/// ```
/// use domain_person::formatting::format_national_id;
///
/// assert_eq!(format_national_id("52998224725"), "529.982.247-25");
/// assert_eq!(format_national_id("5299"), "5299");
/// ```
pub fn format_national_id(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() < NATIONAL_ID_DIGITS {
        return digits;
    }

    let (id, overflow) = digits.split_at(NATIONAL_ID_DIGITS);
    format!(
        "{}.{}.{}-{}{}",
        &id[0..3],
        &id[3..6],
        &id[6..9],
        &id[9..11],
        overflow
    )
}

/// Formats a postal code as `ddddd-ddd`.
///
/// ```
/// use domain_person::formatting::format_postal_code;
///
/// assert_eq!(format_postal_code("01310930"), "01310-930");
/// ```
pub fn format_postal_code(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() < POSTAL_CODE_DIGITS {
        return digits;
    }

    let (code, overflow) = digits.split_at(POSTAL_CODE_DIGITS);
    format!("{}-{}{}", &code[0..5], &code[5..8], overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("529.982.247-25"), "52998224725");
        assert_eq!(digits_only("abc"), "");
        // Non-ASCII digits are not digits here
        assert_eq!(digits_only("١٢3"), "3");
    }

    #[test]
    fn test_format_national_id() {
        assert_eq!(format_national_id("52998224725"), "529.982.247-25");
        assert_eq!(format_national_id("529.982.247-25"), "529.982.247-25");
        assert_eq!(format_national_id(" 529 982 247 25 "), "529.982.247-25");
    }

    #[test]
    fn test_format_national_id_incomplete() {
        assert_eq!(format_national_id(""), "");
        assert_eq!(format_national_id("529.98"), "52998");
        assert_eq!(format_national_id("5299822472"), "5299822472");
    }

    #[test]
    fn test_format_national_id_overflow() {
        assert_eq!(format_national_id("529982247251"), "529.982.247-251");
    }

    #[test]
    fn test_format_postal_code() {
        assert_eq!(format_postal_code("01310930"), "01310-930");
        assert_eq!(format_postal_code("01310-930"), "01310-930");
        assert_eq!(format_postal_code("0131093"), "0131093");
        assert_eq!(format_postal_code("013109301"), "01310-9301");
    }

    proptest! {
        #[test]
        fn prop_format_national_id_idempotent(raw in "[0-9.\\- a-z]{0,20}") {
            let once = format_national_id(&raw);
            prop_assert_eq!(format_national_id(&once), once);
        }

        #[test]
        fn prop_format_postal_code_idempotent(raw in "[0-9\\- a-z]{0,14}") {
            let once = format_postal_code(&raw);
            prop_assert_eq!(format_postal_code(&once), once);
        }

        #[test]
        fn prop_formatting_preserves_digits(raw in "[0-9]{0,16}") {
            prop_assert_eq!(digits_only(&format_national_id(&raw)), raw.clone());
            prop_assert_eq!(digits_only(&format_postal_code(&raw)), raw);
        }
    }
}
