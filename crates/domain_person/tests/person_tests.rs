//! Comprehensive tests for domain_person
//!
//! # Test Organization
//!
//! - `national_id_tests` - Checksum properties and the blocklist
//! - `formatting_tests` - Masks and their idempotence
//! - `age_tests` - Age calculation and the age policy
//! - `record_validation_tests` - Whole-record validation
//! - `registration_tests` - The service over a mock lookup port

use chrono::NaiveDate;
use proptest::prelude::*;

use domain_person::national_id::BLOCKLIST;
use domain_person::{
    calculate_age, check_national_id, format_national_id, format_postal_code, normalize_input,
    validate_age, validate_national_id, validate_record, AgePolicy, Field, FieldError,
    Localizer, NationalIdError, RecordValidator,
};
use test_utils::*;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn digit_values(id: &str) -> Vec<u32> {
    id.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn with_digit(id: &str, position: usize, digit: u32) -> String {
    id.chars()
        .enumerate()
        .map(|(i, c)| if i == position { char::from_digit(digit, 10).unwrap() } else { c })
        .collect()
}

// ============================================================================
// National ID Tests
// ============================================================================

mod national_id_tests {
    use super::*;

    #[test]
    fn test_known_examples() {
        assert!(validate_national_id("52998224725"));
        assert!(!validate_national_id("11111111111"));
        // Checksum passes but the number is blocklisted
        assert!(!validate_national_id("12345678909"));
    }

    #[test]
    fn test_every_blocklist_entry_rejected() {
        for id in BLOCKLIST {
            assert_eq!(check_national_id(id), Err(NationalIdError::Blocklisted), "{id}");
        }
    }

    #[test]
    fn test_separators_ignored() {
        assert!(validate_national_id(" 529.982.247-25 "));
        assert!(validate_national_id("529 982 247 25"));
    }

    proptest! {
        #[test]
        fn test_completed_ids_validate(id in valid_national_id_strategy()) {
            prop_assert!(validate_national_id(&id));
            prop_assert!(validate_national_id(&format_national_id(&id)));
        }

        #[test]
        fn test_changing_a_check_digit_invalidates(
            id in valid_national_id_strategy(),
            position in 9usize..11,
            shift in 1u32..10,
        ) {
            let digits = digit_values(&id);
            let mutated = with_digit(&id, position, (digits[position] + shift) % 10);
            prop_assert!(!validate_national_id(&mutated));
        }

        /// A single-digit change in the base almost always breaks the
        /// checksum. The one exception for digit 0 is a change of one when
        /// the first check digit is 0: its remainder moves between 0 and 10,
        /// both of which yield check digit 0, and digit 0's weight of 11 in
        /// the second sum is invisible modulo 11.
        #[test]
        fn test_changing_digit_zero_invalidates(
            id in valid_national_id_strategy(),
            shift in 1u32..10,
        ) {
            let digits = digit_values(&id);
            let replacement = (digits[0] + shift) % 10;
            let mutated = with_digit(&id, 0, replacement);

            if validate_national_id(&mutated) {
                prop_assert_eq!(digits[9], 0);
                prop_assert_eq!((replacement as i32 - digits[0] as i32).abs(), 1);
            }
        }

        #[test]
        fn test_changing_a_base_digit_rarely_survives(
            id in valid_national_id_strategy(),
            position in 0usize..9,
            shift in 1u32..10,
        ) {
            let digits = digit_values(&id);
            let replacement = (digits[position] + shift) % 10;
            let mutated = with_digit(&id, position, replacement);

            // A surviving change must leave the first check digit at 0,
            // the only value two remainders map to.
            if validate_national_id(&mutated) {
                prop_assert_eq!(digits[9], 0);
            }
        }
    }

    #[test]
    fn test_digit_zero_exception_exists() {
        let base = (0..1000u32)
            .map(|n| {
                let mut base = [0u32; 9];
                base[0] = 5;
                base[6] = n / 100;
                base[7] = (n / 10) % 10;
                base[8] = n % 10;
                base
            })
            .map(domain_person::complete_national_id)
            .find(|id| {
                let digits = digit_values(id);
                digits[9] == 0
                    && !BLOCKLIST.contains(&id.as_str())
                    && [4, 6]
                        .iter()
                        .any(|d| validate_national_id(&with_digit(id, 0, *d)))
            });

        assert!(base.is_some(), "expected some id whose digit 0 can change by one");
    }
}

// ============================================================================
// Formatting Tests
// ============================================================================

mod formatting_tests {
    use super::*;

    #[test]
    fn test_known_masks() {
        assert_eq!(format_national_id("52998224725"), "529.982.247-25");
        assert_eq!(format_postal_code("01310930"), "01310-930");
    }

    #[test]
    fn test_input_caps_then_masks() {
        assert_eq!(normalize_input(Field::NationalId, "529.982.247-25999"), "529.982.247-25");
        assert_eq!(normalize_input(Field::PostalCode, "01310-930123"), "01310-930");
        assert_eq!(normalize_input(Field::Name, "Ana 2ª Souza!"), "Ana  Souza");
    }

    proptest! {
        #[test]
        fn test_national_id_mask_idempotent(raw in noisy_input_strategy()) {
            let once = format_national_id(&raw);
            prop_assert_eq!(format_national_id(&once), once);
        }

        #[test]
        fn test_postal_code_mask_idempotent(raw in digit_string_strategy(12)) {
            let once = format_postal_code(&raw);
            prop_assert_eq!(format_postal_code(&once), once);
        }
    }
}

// ============================================================================
// Age Tests
// ============================================================================

mod age_tests {
    use super::*;

    #[test]
    fn test_anniversary_boundary() {
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 6, 14)), 23);
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 6, 15)), 24);
    }

    #[test]
    fn test_policy_messages() {
        let today = date(2024, 6, 15);
        assert_eq!(
            validate_age(Some(date(2010, 1, 1)), today),
            Err(FieldError::BelowMinimumAge { minimum: 16 })
        );
        assert_eq!(
            validate_age(Some(date(1900, 1, 1)), today),
            Err(FieldError::AboveMaximumAge { maximum: 100 })
        );
    }

    #[test]
    fn test_fixture_boundaries() {
        let today = DateFixtures::today();
        assert_eq!(validate_age(Some(DateFixtures::sixteenth_birthday()), today), Ok(16));
        assert!(validate_age(Some(DateFixtures::almost_sixteen()), today).is_err());
        assert!(validate_age(Some(DateFixtures::over_one_hundred()), today).is_err());
    }

    proptest! {
        #[test]
        fn test_dates_in_range_pass_policy(
            (today, birth) in date_strategy().prop_flat_map(|today| {
                birth_date_with_age_strategy(today, 16, 100).prop_map(move |b| (today, b))
            }),
        ) {
            prop_assert!(AgePolicy::default().check(Some(birth), today).is_ok());
        }

        #[test]
        fn test_age_never_decreases(
            birth in date_strategy(),
            today in date_strategy(),
            later in 0i64..800,
        ) {
            let tomorrow = today + chrono::Duration::days(later);
            prop_assert!(calculate_age(birth, tomorrow) >= calculate_age(birth, today));
        }
    }
}

// ============================================================================
// Record Validation Tests
// ============================================================================

mod record_validation_tests {
    use super::*;

    #[test]
    fn test_four_invalid_fields() {
        let record = PersonRecordBuilder::new()
            .with_name("")
            .with_national_id(NationalIdFixtures::bad_checksum())
            .with_email("maria.example.com")
            .with_postal_code("0131093")
            .build();

        let errors = validate_record(&record, DateFixtures::today());
        assert_error_fields(
            &errors,
            &[Field::Name, Field::NationalId, Field::Email, Field::PostalCode],
        );
        assert_field_ok(&errors, Field::BirthDate);
    }

    #[test]
    fn test_missing_birth_date() {
        let record = PersonRecordBuilder::new().without_birth_date().build();
        let errors = validate_record(&record, DateFixtures::today());
        assert_error_fields(&errors, &[Field::BirthDate]);
        assert_field_error(&errors, Field::BirthDate, &FieldError::BirthDateRequired);
    }

    #[test]
    fn test_custom_policy() {
        let validator = RecordValidator::new(AgePolicy {
            minimum: 18,
            maximum: 65,
        });
        let record = PersonRecordBuilder::new()
            .with_birth_date(DateFixtures::sixteenth_birthday())
            .build();

        let errors = validator.validate(&record, DateFixtures::today());
        assert_field_error(&errors, Field::BirthDate, &FieldError::BelowMinimumAge { minimum: 18 });
    }

    proptest! {
        #[test]
        fn test_generated_records_validate(
            name in name_strategy(),
            national_id in masked_national_id_strategy(),
            email in email_strategy(),
            birth in birth_date_with_age_strategy(DateFixtures::today(), 16, 100),
        ) {
            let record = PersonRecordBuilder::new()
                .with_name(name)
                .with_national_id(national_id)
                .with_email(email)
                .with_birth_date(birth)
                .build();

            let errors = validate_record(&record, DateFixtures::today());
            prop_assert!(errors.is_empty(), "{:?}", errors);
        }
    }

    #[test]
    fn test_errors_render_in_portuguese() {
        let errors = validate_record(&PersonRecordBuilder::empty().build(), DateFixtures::today());
        let messages = Localizer::new("pt-BR").unwrap().render_all(&errors);

        assert_eq!(messages[&Field::Name], "Nome é obrigatório");
        assert_eq!(messages[&Field::NationalId], "CPF inválido");
        assert_eq!(messages[&Field::BirthDate], "Data de nascimento é obrigatória");
        assert_eq!(messages[&Field::Email], "E-mail inválido");
        assert_eq!(messages[&Field::PostalCode], "CEP inválido");
    }
}

// ============================================================================
// Registration Tests
// ============================================================================

mod registration_tests {
    use super::*;
    use domain_person::{FormEvent, PersonError};

    #[tokio::test]
    async fn test_register_and_list() {
        let (service, _) = TestServiceBuilder::new().build().await;

        service.register(PersonInputBuilder::new().build(), None).await.unwrap();
        service
            .register(
                PersonInputBuilder::new()
                    .with_name("João Pereira")
                    .with_national_id(NationalIdFixtures::valid_digits())
                    .with_postal_code("01001-000")
                    .build(),
                None,
            )
            .await
            .unwrap();

        let people = service.people().await;
        assert_eq!(people.len(), 2);
        assert_eq!(people[1].record.national_id, "111.444.777-35");
        assert_eq!(people[1].record.address, AddressFixtures::se());
        assert_eq!(people[1].age, Some(34));
    }

    #[tokio::test]
    async fn test_rejected_registration_leaves_roster_unchanged() {
        let (service, _) = TestServiceBuilder::new().build().await;

        let errors = service
            .register(
                PersonInputBuilder::new().with_birth_date("2010-01-01").build(),
                None,
            )
            .await
            .unwrap_err();

        assert_field_error(&errors, Field::BirthDate, &FieldError::BelowMinimumAge { minimum: 16 });
        assert!(service.people().await.is_empty());
    }

    #[tokio::test]
    async fn test_form_flow_with_lookup() {
        let (service, port) = TestServiceBuilder::new().build().await;
        let mut form = service.new_form();

        service.edit(&mut form, Field::Name, "Maria da Silva", None).await;
        service.edit(&mut form, Field::NationalId, "52998224725", None).await;
        service.edit(&mut form, Field::BirthDate, "1990-03-10", None).await;
        service.edit(&mut form, Field::Email, "maria@example.com", None).await;

        let event = service.edit(&mut form, Field::PostalCode, "0131093", None).await;
        assert_eq!(event, FormEvent::AddressCleared);
        assert_eq!(port.calls(), 0);

        service.edit(&mut form, Field::PostalCode, "01310930", None).await;
        assert_eq!(form.address(), &AddressFixtures::paulista());

        let entry = service.submit(&mut form).await.unwrap();
        assert_eq!(entry.index, 0);
        assert_eq!(form.value(Field::Name), "");
    }

    #[tokio::test]
    async fn test_remove_middle_entry() {
        let (service, _) = TestServiceBuilder::new().build().await;
        for name in ["Ana", "Bruno", "Carla"] {
            service
                .register(PersonInputBuilder::new().with_name(name).build(), None)
                .await
                .unwrap();
        }

        service.remove(1).await.unwrap();
        let names: Vec<_> = service
            .people()
            .await
            .into_iter()
            .map(|entry| (entry.index, entry.record.name))
            .collect();
        assert_eq!(names, vec![(0, "Ana".to_string()), (1, "Carla".to_string())]);

        assert!(matches!(
            service.remove(2).await,
            Err(PersonError::RosterIndexOutOfRange { index: 2, len: 2 })
        ));
    }
}
