//! Person domain services
//!
//! `RegistrationService` ties the pieces together: it drives a
//! [`PersonForm`] through edits and postal-code lookups, validates
//! submissions against the injected clock, and owns the roster of
//! accepted people.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use core_kernel::{Clock, HealthCheckResult, OperationMetadata};

use crate::error::{LookupError, PersonError};
use crate::form::{FormEvent, PersonForm};
use crate::person::{Address, Field, PersonRecord, PostalCode};
use crate::ports::PostalCodePort;
use crate::roster::{Roster, RosterEntry};
use crate::validation::{FieldError, FieldErrors, RecordValidator};

/// Raw values for a one-shot registration, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonInput {
    pub name: String,
    pub national_id: String,
    /// `YYYY-MM-DD`; empty if not given
    pub birth_date: String,
    pub email: String,
    pub postal_code: String,
}

impl PersonInput {
    fn values(&self) -> [(Field, &str); 5] {
        [
            (Field::Name, self.name.as_str()),
            (Field::NationalId, self.national_id.as_str()),
            (Field::BirthDate, self.birth_date.as_str()),
            (Field::Email, self.email.as_str()),
            (Field::PostalCode, self.postal_code.as_str()),
        ]
    }
}

/// Service for registering people
///
/// # Example
///
/// ```rust,ignore
/// let service = RegistrationService::new(Arc::new(adapter), Arc::new(SystemClock));
/// let entry = service.register(input, None).await?;
/// println!("registered #{} aged {:?}", entry.index, entry.age);
/// ```
pub struct RegistrationService {
    postal_codes: Arc<dyn PostalCodePort>,
    clock: Arc<dyn Clock>,
    validator: RecordValidator,
    roster: RwLock<Roster>,
}

impl RegistrationService {
    /// Creates a service with the default age policy and an empty roster
    pub fn new(postal_codes: Arc<dyn PostalCodePort>, clock: Arc<dyn Clock>) -> Self {
        Self {
            postal_codes,
            clock,
            validator: RecordValidator::default(),
            roster: RwLock::new(Roster::new()),
        }
    }

    pub fn with_validator(mut self, validator: RecordValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn validator(&self) -> RecordValidator {
        self.validator
    }

    /// A fresh form validated with this service's policy
    pub fn new_form(&self) -> PersonForm {
        PersonForm::with_validator(self.validator)
    }

    /// Applies one edit to `form`.
    ///
    /// When the edit completes the postal code, the lookup runs before this
    /// returns and its result is applied to the form.
    pub async fn edit(
        &self,
        form: &mut PersonForm,
        field: Field,
        raw: &str,
        metadata: Option<OperationMetadata>,
    ) -> FormEvent {
        let event = form.set_field(field, raw);

        if let FormEvent::LookupRequested(ref ticket) = event {
            let outcome = self.postal_codes.lookup(&ticket.postal_code, metadata).await;
            form.apply_lookup(ticket, outcome);
        }

        event
    }

    /// Submits `form` and appends the record on success.
    ///
    /// # Errors
    ///
    /// The field errors; the form keeps its values and shows them
    pub async fn submit(&self, form: &mut PersonForm) -> Result<RosterEntry, FieldErrors> {
        let today = self.clock.today();
        let record = form.submit(today)?;
        Ok(self.append(record).await)
    }

    /// Registers a person in one step: fill a form, resolve the postal
    /// code, submit.
    #[instrument(skip(self, input, metadata))]
    pub async fn register(
        &self,
        input: PersonInput,
        metadata: Option<OperationMetadata>,
    ) -> Result<RosterEntry, FieldErrors> {
        let mut form = self.new_form();
        for (field, raw) in input.values() {
            self.edit(&mut form, field, raw, metadata.clone()).await;
        }

        let result = self.submit(&mut form).await;
        if let Err(ref errors) = result {
            debug!(fields = ?errors.fields().collect::<Vec<_>>(), "registration rejected");
        }
        result
    }

    async fn append(&self, record: PersonRecord) -> RosterEntry {
        let age = record.age_on(self.clock.today());
        let address_line = record.address.format();

        let index = self.roster.write().await.push(record.clone());
        info!(index, "person registered");

        RosterEntry {
            index,
            age,
            address_line,
            record,
        }
    }

    /// Removes the person at `index`; later entries move up by one.
    ///
    /// # Errors
    ///
    /// `PersonError::RosterIndexOutOfRange`; the roster is left unchanged
    pub async fn remove(&self, index: usize) -> Result<PersonRecord, PersonError> {
        let mut roster = self.roster.write().await;
        let len = roster.len();
        let removed = roster
            .remove(index)
            .ok_or(PersonError::RosterIndexOutOfRange { index, len })?;
        info!(index, "person removed");
        Ok(removed)
    }

    /// Every registered person, in registration order
    pub async fn people(&self) -> Vec<RosterEntry> {
        self.roster.read().await.entries(self.clock.today())
    }

    pub async fn person(&self, index: usize) -> Option<RosterEntry> {
        self.roster.read().await.entry(index, self.clock.today())
    }

    /// Resolves a raw postal code outside of any form
    ///
    /// # Errors
    ///
    /// - `PostalCodeInvalid` unless the input has exactly eight digits
    /// - `PostalCodeNotFound` when the service knows no address for it
    /// - `PostalCodeLookupFailed` when the service could not answer
    pub async fn resolve_postal_code(
        &self,
        raw: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Address, FieldError> {
        let postal_code = PostalCode::parse(raw).ok_or(FieldError::PostalCodeInvalid)?;

        self.postal_codes
            .lookup(&postal_code, metadata)
            .await
            .map_err(|error| match error {
                LookupError::NotFound(_) => FieldError::PostalCodeNotFound,
                LookupError::Port(_) => FieldError::PostalCodeLookupFailed,
            })
    }

    pub async fn postal_code_health(&self) -> HealthCheckResult {
        self.postal_codes.health_check().await
    }
}
