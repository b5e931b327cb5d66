//! Custom Test Assertions
//!
//! Provides assertion helpers for field errors that print the whole error
//! map on failure instead of a bare `false`.

use domain_person::{Field, FieldError, FieldErrors};

/// Asserts that `field` carries exactly `expected`
///
/// # Panics
///
/// Panics if the field has no error or a different one
pub fn assert_field_error(errors: &FieldErrors, field: Field, expected: &FieldError) {
    assert_eq!(
        errors.get(field),
        Some(expected),
        "Expected {field} to fail with {expected:?}, got errors {errors:?}"
    );
}

/// Asserts that exactly the given fields carry errors
pub fn assert_error_fields(errors: &FieldErrors, expected: &[Field]) {
    let mut actual: Vec<Field> = errors.fields().collect();
    let mut expected = expected.to_vec();
    actual.sort();
    expected.sort();
    assert_eq!(actual, expected, "Unexpected error fields: {errors:?}");
}

/// Asserts that `field` carries no error
pub fn assert_field_ok(errors: &FieldErrors, field: Field) {
    assert!(
        !errors.contains(field),
        "Expected {field} to be valid, got {:?}",
        errors.get(field)
    );
}

/// Asserts that a validation result has no errors at all
pub fn assert_no_errors(errors: &FieldErrors) {
    assert!(errors.is_empty(), "Expected no errors, got {errors:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors() -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.set(FieldError::NameRequired);
        errors.set(FieldError::EmailInvalid);
        errors
    }

    #[test]
    fn test_assert_field_error_passes() {
        assert_field_error(&errors(), Field::Name, &FieldError::NameRequired);
    }

    #[test]
    #[should_panic(expected = "Expected nationalId to fail")]
    fn test_assert_field_error_fails() {
        assert_field_error(&errors(), Field::NationalId, &FieldError::NationalIdInvalid);
    }

    #[test]
    fn test_assert_error_fields_ignores_order() {
        assert_error_fields(&errors(), &[Field::Email, Field::Name]);
        assert_field_ok(&errors(), Field::PostalCode);
    }
}
