//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. Tests specify only the fields they care about.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::FixedClock;
use domain_person::{
    Address, MockPostalCodePort, PersonInput, PersonRecord, PostalCode, RecordValidator,
    RegistrationService,
};

use crate::fixtures::{AddressFixtures, DateFixtures, PersonFixtures};

/// Builder for person records
pub struct PersonRecordBuilder {
    record: PersonRecord,
}

impl Default for PersonRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonRecordBuilder {
    /// Starts from a record that passes validation
    pub fn new() -> Self {
        Self {
            record: PersonFixtures::valid_record(),
        }
    }

    /// Starts from a record with every field empty
    pub fn empty() -> Self {
        Self {
            record: PersonRecord::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.record.name = name.into();
        self
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.record.national_id = national_id.into();
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.record.birth_date = Some(birth_date);
        self
    }

    pub fn without_birth_date(mut self) -> Self {
        self.record.birth_date = None;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.record.email = email.into();
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.record.postal_code = postal_code.into();
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.record.address = address;
        self
    }

    pub fn build(self) -> PersonRecord {
        self.record
    }
}

/// Builder for raw registration input
pub struct PersonInputBuilder {
    input: PersonInput,
}

impl Default for PersonInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonInputBuilder {
    /// Starts from input that registers successfully against
    /// [`AddressFixtures::known`]
    pub fn new() -> Self {
        Self {
            input: PersonInput {
                name: "Maria da Silva".to_string(),
                national_id: "52998224725".to_string(),
                birth_date: DateFixtures::adult_birth_date().format("%Y-%m-%d").to_string(),
                email: "maria.silva@example.com".to_string(),
                postal_code: AddressFixtures::paulista_code().digits().to_string(),
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.input.name = name.into();
        self
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.input.national_id = national_id.into();
        self
    }

    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.input.birth_date = birth_date.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.input.email = email.into();
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.input.postal_code = postal_code.into();
        self
    }

    pub fn build(self) -> PersonInput {
        self.input
    }

    /// The input as an HTTP request body
    pub fn build_json(self) -> serde_json::Value {
        serde_json::json!({
            "name": self.input.name,
            "nationalId": self.input.national_id,
            "birthDate": self.input.birth_date,
            "email": self.input.email,
            "postalCode": self.input.postal_code,
        })
    }
}

/// Builder for a registration service over a mock lookup port
pub struct TestServiceBuilder {
    addresses: Vec<(PostalCode, Address)>,
    today: NaiveDate,
    validator: RecordValidator,
}

impl Default for TestServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestServiceBuilder {
    /// Known addresses from [`AddressFixtures::known`], today from
    /// [`DateFixtures::today`]
    pub fn new() -> Self {
        Self {
            addresses: AddressFixtures::known(),
            today: DateFixtures::today(),
            validator: RecordValidator::default(),
        }
    }

    pub fn with_address(mut self, postal_code: PostalCode, address: Address) -> Self {
        self.addresses.push((postal_code, address));
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_validator(mut self, validator: RecordValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Builds the service and returns the port for inspection
    pub async fn build(self) -> (RegistrationService, Arc<MockPostalCodePort>) {
        let port = Arc::new(MockPostalCodePort::with_addresses(self.addresses).await);
        let service = RegistrationService::new(port.clone(), Arc::new(FixedClock::new(self.today)))
            .with_validator(self.validator);
        (service, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_person::validate_record;

    #[test]
    fn test_record_builder_defaults_are_valid() {
        let record = PersonRecordBuilder::new().build();
        assert!(validate_record(&record, DateFixtures::today()).is_empty());
    }

    #[test]
    fn test_record_builder_overrides() {
        let record = PersonRecordBuilder::empty().with_name("Ana").build();
        assert_eq!(record.name, "Ana");
        assert!(record.birth_date.is_none());
    }

    #[test]
    fn test_input_json_uses_camel_case() {
        let json = PersonInputBuilder::new().build_json();
        assert_eq!(json["nationalId"], "52998224725");
        assert_eq!(json["postalCode"], "01310930");
        assert_eq!(json["birthDate"], "1990-03-10");
    }

    #[tokio::test]
    async fn test_service_builder_registers_default_input() {
        let (service, port) = TestServiceBuilder::new().build().await;
        let entry = service.register(PersonInputBuilder::new().build(), None).await.unwrap();
        assert_eq!(entry.record.address, AddressFixtures::paulista());
        assert_eq!(port.calls(), 1);
    }
}
