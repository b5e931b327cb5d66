//! Person Registration Domain
//!
//! This crate validates and stores Brazilian person registrations: a name,
//! a CPF (national ID), a birth date, an e-mail address and a CEP (postal
//! code) whose street address is resolved through a lookup service.
//!
//! # Building blocks
//!
//! - **formatting**: digit extraction and the `ddd.ddd.ddd-dd` / `ddddd-ddd` masks
//! - **national_id**: the CPF checksum
//! - **age**: whole-year age and the 16..=100 age policy
//! - **validation**: whole-record validation into a per-field error map
//! - **form**: edit-by-edit form state with stale-lookup protection
//! - **roster**: the in-memory list of accepted people
//! - **services**: `RegistrationService`, which wires the above to a lookup port
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_person::{format_national_id, validate_national_id, validate_record, PersonRecord};
//!
//! assert_eq!(format_national_id("52998224725"), "529.982.247-25");
//! assert!(validate_national_id("529.982.247-25"));
//!
//! let record = PersonRecord {
//!     name: "Maria da Silva".to_string(),
//!     national_id: "529.982.247-25".to_string(),
//!     birth_date: NaiveDate::from_ymd_opt(1990, 3, 10),
//!     email: "maria@example.com".to_string(),
//!     postal_code: "01310-930".to_string(),
//!     ..Default::default()
//! };
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! assert!(validate_record(&record, today).is_empty());
//! ```

pub mod person;
pub mod formatting;
pub mod national_id;
pub mod age;
pub mod input;
pub mod validation;
pub mod form;
pub mod roster;
pub mod messages;
pub mod error;
pub mod ports;
pub mod adapters;
pub mod services;

pub use person::{Address, Field, PersonRecord, PostalCode};
pub use formatting::{digits_only, format_national_id, format_postal_code};
pub use national_id::{
    check_national_id, complete_national_id, validate_national_id, NationalIdError,
};
pub use age::{calculate_age, validate_age, AgePolicy, MAXIMUM_AGE, MINIMUM_AGE};
pub use input::normalize_input;
pub use validation::{
    is_complete_postal_code, is_valid_email, validate_record, FieldError, FieldErrors,
    RecordValidator,
};
pub use form::{FormEvent, LookupTicket, PersonForm};
pub use roster::{Roster, RosterEntry};
pub use messages::{Localizer, DEFAULT_LOCALE};
pub use error::{LookupError, PersonError};
pub use ports::PostalCodePort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockPostalCodePort;
pub use adapters::{ViaCepAdapter, ViaCepConfig};
pub use services::{PersonInput, RegistrationService};
