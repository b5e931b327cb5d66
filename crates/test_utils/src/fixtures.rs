//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the person registry. Every value is
//! fixed so tests stay predictable.

use chrono::NaiveDate;
use domain_person::{Address, PersonRecord, PostalCode};

/// Fixture for national ID (CPF) test data
pub struct NationalIdFixtures;

impl NationalIdFixtures {
    /// A valid CPF, masked
    pub fn valid() -> &'static str {
        "529.982.247-25"
    }

    /// Another valid CPF, as bare digits
    pub fn valid_digits() -> &'static str {
        "11144477735"
    }

    /// Valid CPFs in both masked and bare forms
    pub fn all_valid() -> Vec<&'static str> {
        vec!["529.982.247-25", "52998224725", "111.444.777-35", "11144477735"]
    }

    /// Eleven digits with a wrong second check digit
    pub fn bad_checksum() -> &'static str {
        "529.982.247-24"
    }

    /// Passes the checksum but is blocklisted
    pub fn repeated_digits() -> &'static str {
        "111.111.111-11"
    }

    /// Too few digits
    pub fn truncated() -> &'static str {
        "529.982.247"
    }
}

/// Fixture for postal code and address test data
pub struct AddressFixtures;

impl AddressFixtures {
    /// Postal code of Avenida Paulista, São Paulo
    pub fn paulista_code() -> PostalCode {
        PostalCode::parse("01310930").unwrap()
    }

    pub fn paulista() -> Address {
        Address {
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            region: "SP".to_string(),
        }
    }

    /// Postal code of Praça da Sé, São Paulo
    pub fn se_code() -> PostalCode {
        PostalCode::parse("01001000").unwrap()
    }

    pub fn se() -> Address {
        Address {
            street: "Praça da Sé".to_string(),
            neighborhood: "Sé".to_string(),
            city: "São Paulo".to_string(),
            region: "SP".to_string(),
        }
    }

    /// A well-formed code no lookup fixture knows
    pub fn unknown_code() -> PostalCode {
        PostalCode::parse("99999999").unwrap()
    }

    /// Every known code with its address
    pub fn known() -> Vec<(PostalCode, Address)> {
        vec![
            (Self::paulista_code(), Self::paulista()),
            (Self::se_code(), Self::se()),
        ]
    }
}

/// Fixture for calendar test data
pub struct DateFixtures;

impl DateFixtures {
    /// The "today" most tests run against (June 15, 2024)
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// Birth date of a 34-year-old on `today()`
    pub fn adult_birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 3, 10).unwrap()
    }

    /// Birth date that turns 16 exactly on `today()`
    pub fn sixteenth_birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2008, 6, 15).unwrap()
    }

    /// Birth date that turns 16 the day after `today()`
    pub fn almost_sixteen() -> NaiveDate {
        NaiveDate::from_ymd_opt(2008, 6, 16).unwrap()
    }

    /// Birth date that turns 101 on `today()`
    pub fn over_one_hundred() -> NaiveDate {
        NaiveDate::from_ymd_opt(1923, 6, 15).unwrap()
    }
}

/// Fixture for complete records
pub struct PersonFixtures;

impl PersonFixtures {
    /// A record that passes validation on `DateFixtures::today()`
    pub fn valid_record() -> PersonRecord {
        PersonRecord {
            name: "Maria da Silva".to_string(),
            national_id: NationalIdFixtures::valid().to_string(),
            birth_date: Some(DateFixtures::adult_birth_date()),
            email: "maria.silva@example.com".to_string(),
            postal_code: AddressFixtures::paulista_code().masked(),
            address: AddressFixtures::paulista(),
        }
    }
}
