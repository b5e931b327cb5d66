//! Registration form state
//!
//! `PersonForm` holds what the user has typed so far, the derived address,
//! and the current field errors. It never talks to the lookup service
//! itself: completing the postal code hands out a [`LookupTicket`], and
//! the caller brings the result back through [`PersonForm::apply_lookup`].
//!
//! # Stale lookups
//!
//! Every ticket carries a token from a counter that only goes up. A result
//! is applied only if its ticket is the latest one issued and the form
//! still holds the same eight digits. Anything else is dropped, so a slow
//! response for an old code can never overwrite the address of a newer one.

use chrono::NaiveDate;
use tracing::debug;

use core_kernel::parse_iso_date;

use crate::error::LookupError;
use crate::input::normalize_input;
use crate::person::{Address, Field, PersonRecord, PostalCode};
use crate::validation::{FieldError, FieldErrors, RecordValidator};

/// Permission to apply one lookup result to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub token: u64,
    pub postal_code: PostalCode,
}

/// What an edit did beyond storing the value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The value was stored; nothing else happened
    Updated,
    /// The postal code became complete; the caller should look it up
    LookupRequested(LookupTicket),
    /// The postal code is incomplete; derived address fields were cleared
    AddressCleared,
}

/// Transient state of the registration form
#[derive(Debug, Clone, Default)]
pub struct PersonForm {
    name: String,
    national_id: String,
    birth_date: String,
    email: String,
    postal_code: String,
    address: Address,
    errors: FieldErrors,
    lookup_generation: u64,
    validator: RecordValidator,
}

impl PersonForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty form that validates with `validator`
    pub fn with_validator(validator: RecordValidator) -> Self {
        Self {
            validator,
            ..Self::default()
        }
    }

    /// The stored (normalized) value of `field`
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::NationalId => &self.national_id,
            Field::BirthDate => &self.birth_date,
            Field::Email => &self.email,
            Field::PostalCode => &self.postal_code,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Stores an edit to `field`.
    ///
    /// The raw input is normalized first and the field's error is cleared.
    /// Editing the postal code either requests a lookup (exactly eight
    /// digits) or clears the derived address.
    pub fn set_field(&mut self, field: Field, raw: &str) -> FormEvent {
        let value = normalize_input(field, raw);
        self.errors.clear(field);

        match field {
            Field::Name => self.name = value,
            Field::NationalId => self.national_id = value,
            Field::BirthDate => self.birth_date = value,
            Field::Email => self.email = value,
            Field::PostalCode => {
                self.postal_code = value;
                return self.postal_code_changed();
            }
        }

        FormEvent::Updated
    }

    fn postal_code_changed(&mut self) -> FormEvent {
        self.lookup_generation += 1;
        // The address only ever belongs to the code that resolved it
        self.address = Address::default();

        match PostalCode::parse(&self.postal_code) {
            Some(postal_code) => FormEvent::LookupRequested(LookupTicket {
                token: self.lookup_generation,
                postal_code,
            }),
            None => FormEvent::AddressCleared,
        }
    }

    /// Applies a lookup result if its ticket is still current.
    ///
    /// # Returns
    ///
    /// `true` if the result was applied, `false` if it was stale
    pub fn apply_lookup(
        &mut self,
        ticket: &LookupTicket,
        outcome: Result<Address, LookupError>,
    ) -> bool {
        let still_current = ticket.token == self.lookup_generation
            && PostalCode::parse(&self.postal_code).as_ref() == Some(&ticket.postal_code);

        if !still_current {
            debug!(
                token = ticket.token,
                current = self.lookup_generation,
                postal_code = %ticket.postal_code,
                "dropping stale postal-code lookup"
            );
            return false;
        }

        match outcome {
            Ok(address) => self.address = address,
            Err(error) => {
                self.address = Address::default();
                self.errors.set(match error {
                    LookupError::NotFound(_) => FieldError::PostalCodeNotFound,
                    LookupError::Port(_) => FieldError::PostalCodeLookupFailed,
                });
            }
        }

        true
    }

    /// Builds a record from the current form values.
    ///
    /// An empty birth date becomes `None`. A non-empty one that is not a
    /// real `YYYY-MM-DD` date also becomes `None` and is reported through
    /// the returned error.
    pub fn to_record(&self) -> (PersonRecord, Option<FieldError>) {
        let (birth_date, birth_date_error) = match self.birth_date.trim() {
            "" => (None, None),
            raw => match parse_iso_date(raw) {
                Ok(date) => (Some(date), None),
                Err(_) => (None, Some(FieldError::BirthDateUnreadable)),
            },
        };

        let record = PersonRecord {
            name: self.name.clone(),
            national_id: self.national_id.clone(),
            birth_date,
            email: self.email.clone(),
            postal_code: self.postal_code.clone(),
            address: self.address.clone(),
        };

        (record, birth_date_error)
    }

    /// Validates the form as of `today`.
    ///
    /// On success the form is reset and the record returned. On failure the
    /// errors replace the form's current errors and are returned.
    pub fn submit(&mut self, today: NaiveDate) -> Result<PersonRecord, FieldErrors> {
        let (record, birth_date_error) = self.to_record();
        let mut errors = self.validator.validate(&record, today);

        if let Some(error) = birth_date_error {
            errors.set(error);
        }

        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }

        self.reset();
        Ok(record)
    }

    /// Clears every value and error and invalidates outstanding tickets
    pub fn reset(&mut self) {
        let generation = self.lookup_generation + 1;
        *self = Self {
            lookup_generation: generation,
            validator: self.validator,
            ..Self::default()
        };
    }
}
