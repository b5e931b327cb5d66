//! Person record validation
//!
//! This module checks a complete person record before it is added to the
//! roster and reports every failing field at once.
//!
//! # Validation Rules
//!
//! - **name**: must not be empty or whitespace-only
//! - **nationalId**: eleven digits passing the checksum, not blocklisted
//! - **birthDate**: required; the age on the given day must be 16 to 100
//! - **email**: `local@domain.tld` shape with no whitespace
//! - **postalCode**: exactly eight digits
//!
//! Each field holds at most one error. For the birth date the presence
//! check runs first and the age policy then overwrites its message when
//! it also fails, so the age-policy message always wins.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::age::AgePolicy;
use crate::formatting::{digits_only, POSTAL_CODE_DIGITS};
use crate::national_id::check_national_id;
use crate::person::{Field, PersonRecord};

/// A field-level validation or lookup error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,

    #[error("Invalid national ID")]
    NationalIdInvalid,

    #[error("Birth date is required")]
    BirthDateRequired,

    #[error("Birth date is not a valid date")]
    BirthDateUnreadable,

    #[error("Minimum allowed age is {minimum} years")]
    BelowMinimumAge { minimum: i32 },

    #[error("Maximum allowed age is {maximum} years")]
    AboveMaximumAge { maximum: i32 },

    #[error("Invalid e-mail")]
    EmailInvalid,

    #[error("Invalid postal code")]
    PostalCodeInvalid,

    #[error("Postal code not found")]
    PostalCodeNotFound,

    #[error("Postal code lookup failed")]
    PostalCodeLookupFailed,
}

impl FieldError {
    /// The field this error is reported against
    pub fn field(&self) -> Field {
        match self {
            FieldError::NameRequired => Field::Name,
            FieldError::NationalIdInvalid => Field::NationalId,
            FieldError::BirthDateRequired
            | FieldError::BirthDateUnreadable
            | FieldError::BelowMinimumAge { .. }
            | FieldError::AboveMaximumAge { .. } => Field::BirthDate,
            FieldError::EmailInvalid => Field::Email,
            FieldError::PostalCodeInvalid
            | FieldError::PostalCodeNotFound
            | FieldError::PostalCodeLookupFailed => Field::PostalCode,
        }
    }
}

/// Per-field error map; empty means valid.
///
/// Keys come from the closed [`Field`] set and each field holds at most
/// one error. Iteration follows form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error against its own field, replacing any earlier one
    pub fn set(&mut self, error: FieldError) {
        self.errors.insert(error.field(), error);
    }

    /// Removes the error for `field`, if any
    pub fn clear(&mut self, field: Field) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, error) in &self.errors {
            map.serialize_entry(field, &error.to_string())?;
        }
        map.end()
    }
}

/// Returns true if `email` has the shape `local@domain.tld`.
///
/// No whitespace anywhere, exactly one `@` with text on both sides, and a
/// dot in the domain with text on both sides of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Returns true if `raw` holds exactly eight digits once separators are removed
pub fn is_complete_postal_code(raw: &str) -> bool {
    digits_only(raw).len() == POSTAL_CODE_DIGITS
}

/// Validator for person records
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use domain_person::person::{Field, PersonRecord};
/// use domain_person::validation::RecordValidator;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let errors = RecordValidator::default().validate(&PersonRecord::default(), today);
///
/// assert!(errors.contains(Field::Name));
/// assert!(errors.contains(Field::BirthDate));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator {
    age_policy: AgePolicy,
}

impl RecordValidator {
    pub fn new(age_policy: AgePolicy) -> Self {
        Self { age_policy }
    }

    pub fn age_policy(&self) -> AgePolicy {
        self.age_policy
    }

    /// Validates every field of `record` as of `today`.
    ///
    /// All checks run; an empty result means the record is accepted.
    pub fn validate(&self, record: &PersonRecord, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if record.name.trim().is_empty() {
            errors.set(FieldError::NameRequired);
        }

        if let Err(reason) = check_national_id(&record.national_id) {
            debug!(%reason, "national ID rejected");
            errors.set(FieldError::NationalIdInvalid);
        }

        if record.birth_date.is_none() {
            errors.set(FieldError::BirthDateRequired);
        }

        // Overwrites the presence error above
        if let Err(error) = self.age_policy.check(record.birth_date, today) {
            errors.set(error);
        }

        if !is_valid_email(&record.email) {
            errors.set(FieldError::EmailInvalid);
        }

        if !is_complete_postal_code(&record.postal_code) {
            errors.set(FieldError::PostalCodeInvalid);
        }

        errors
    }
}

/// Validates `record` with the default age policy
pub fn validate_record(record: &PersonRecord, today: NaiveDate) -> FieldErrors {
    RecordValidator::default().validate(record, today)
}
