//! Person record and its value types
//!
//! A `PersonRecord` is the entity collected by the registration form. The
//! identifying fields are stored in their masked display form; the address
//! fields are derived from the postal-code lookup and are never typed by
//! the user.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::age::calculate_age;
use crate::formatting::{digits_only, format_postal_code, POSTAL_CODE_DIGITS};

/// The user-editable fields of a person record.
///
/// Field errors are keyed by this closed set; the derived address fields
/// are not part of it because the user never types them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    NationalId,
    BirthDate,
    Email,
    PostalCode,
}

impl Field {
    /// All editable fields, in form order
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::NationalId,
        Field::BirthDate,
        Field::Email,
        Field::PostalCode,
    ];

    /// Returns the wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::NationalId => "nationalId",
            Field::BirthDate => "birthDate",
            Field::Email => "email",
            Field::PostalCode => "postalCode",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete 8-digit postal code.
///
/// Only constructed from input holding exactly eight digits, so holding a
/// `PostalCode` means the code is ready for lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Parses raw input, ignoring separators.
    ///
    /// Returns `None` unless exactly eight digits remain.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = digits_only(raw);
        (digits.len() == POSTAL_CODE_DIGITS).then_some(Self(digits))
    }

    /// The bare eight digits
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// The masked `ddddd-ddd` form
    pub fn masked(&self) -> String {
        format_postal_code(&self.0)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl TryFrom<String> for PostalCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PostalCode::parse(&value).ok_or_else(|| format!("invalid postal code: {value}"))
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

/// Address fields derived from a postal-code lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    /// State or region code (e.g. "SP")
    pub region: String,
}

impl Address {
    /// Returns true when no derived field is populated
    pub fn is_empty(&self) -> bool {
        self.street.is_empty()
            && self.neighborhood.is_empty()
            && self.city.is_empty()
            && self.region.is_empty()
    }

    /// Formats the address on one line: `street, neighborhood, city - region`.
    /// An empty address formats as an empty string.
    pub fn format(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        format!(
            "{}, {}, {} - {}",
            self.street, self.neighborhood, self.city, self.region
        )
    }
}

/// A person record as collected by the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    /// Full name; Latin letters (accented included) and spaces
    pub name: String,
    /// National ID in display form (`ddd.ddd.ddd-dd` when complete)
    pub national_id: String,
    /// Birth date; `None` while the form field is empty
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    /// Postal code in display form (`ddddd-ddd` when complete)
    pub postal_code: String,
    /// Derived from the postal-code lookup
    #[serde(flatten)]
    pub address: Address,
}

impl PersonRecord {
    /// Age in whole years as of `today`, if a birth date is present
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.birth_date.map(|birth| calculate_age(birth, today))
    }
}
