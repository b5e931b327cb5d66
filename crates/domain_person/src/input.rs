//! Keystroke normalization for form fields
//!
//! Every edit passes through [`normalize_input`] before it is stored. Caps
//! count characters, not bytes, so accented names are never cut inside a
//! code point.

use crate::formatting::{format_national_id, format_postal_code};
use crate::person::Field;

/// Raw characters accepted for the national ID, room for the mask included
pub const NATIONAL_ID_MAX_CHARS: usize = 14;

/// Raw characters accepted for the postal code, room for the mask included
pub const POSTAL_CODE_MAX_CHARS: usize = 9;

pub const NAME_MAX_CHARS: usize = 150;

pub const EMAIL_MAX_CHARS: usize = 200;

/// Accented letters allowed in names, in either case
const NAME_ACCENTED: &str = "áàâãéèêíïóôõöúçñ";

fn truncate_chars(raw: &str, max: usize) -> &str {
    match raw.char_indices().nth(max) {
        Some((end, _)) => &raw[..end],
        None => raw,
    }
}

/// Returns true for characters allowed in a name
pub fn is_name_char(c: char) -> bool {
    c == ' '
        || c.is_ascii_alphabetic()
        || c.to_lowercase().all(|lower| NAME_ACCENTED.contains(lower))
}

/// Normalizes a raw edit for `field`.
///
/// - national ID: first 14 characters, then masked
/// - postal code: first 9 characters, then masked
/// - name: first 150 characters, keeping only letters and spaces
/// - email: first 200 characters
/// - birth date: unchanged
pub fn normalize_input(field: Field, raw: &str) -> String {
    match field {
        Field::NationalId => format_national_id(truncate_chars(raw, NATIONAL_ID_MAX_CHARS)),
        Field::PostalCode => format_postal_code(truncate_chars(raw, POSTAL_CODE_MAX_CHARS)),
        Field::Name => truncate_chars(raw, NAME_MAX_CHARS)
            .chars()
            .filter(|c| is_name_char(*c))
            .collect(),
        Field::Email => truncate_chars(raw, EMAIL_MAX_CHARS).to_string(),
        Field::BirthDate => raw.to_string(),
    }
}
