//! Localized field-error messages
//!
//! Messages live in Fluent catalogs under `locales/`, compiled into the
//! crate. Brazilian Portuguese is the default; English is available for
//! API clients that ask for it.

use std::collections::BTreeMap;

use fluent::concurrent::FluentBundle;
use fluent::{FluentArgs, FluentResource};
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::error::PersonError;
use crate::person::Field;
use crate::validation::{FieldError, FieldErrors};

/// Locale used when none is configured or the requested one is unsupported
pub const DEFAULT_LOCALE: &str = "pt-BR";

const CATALOGS: [(&str, &str); 2] = [
    ("pt-BR", include_str!("../locales/pt-BR.ftl")),
    ("en-US", include_str!("../locales/en-US.ftl")),
];

/// Renders [`FieldError`]s as user-facing messages in one locale
pub struct Localizer {
    locale: LanguageIdentifier,
    bundle: FluentBundle<FluentResource>,
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer").field("locale", &self.locale).finish()
    }
}

impl Localizer {
    /// Creates a localizer for a BCP 47 tag such as `pt-BR` or `en`.
    ///
    /// Matching is by language; an unsupported language falls back to
    /// [`DEFAULT_LOCALE`].
    ///
    /// # Errors
    ///
    /// `PersonError::InvalidLocale` if the tag is malformed
    pub fn new(tag: &str) -> Result<Self, PersonError> {
        let requested: LanguageIdentifier = tag
            .parse()
            .map_err(|_| PersonError::InvalidLocale(tag.to_string()))?;

        let (catalog_tag, source) = CATALOGS
            .iter()
            .copied()
            .find(|(catalog_tag, _)| {
                catalog_tag
                    .parse::<LanguageIdentifier>()
                    .map(|id| id.language == requested.language)
                    .unwrap_or(false)
            })
            .unwrap_or_else(|| {
                warn!(locale = %requested, fallback = DEFAULT_LOCALE, "unsupported locale");
                CATALOGS[0]
            });

        Self::from_catalog(catalog_tag, source)
    }

    fn from_catalog(tag: &str, source: &str) -> Result<Self, PersonError> {
        let locale: LanguageIdentifier = tag
            .parse()
            .map_err(|_| PersonError::InvalidLocale(tag.to_string()))?;

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| PersonError::catalog(tag, format!("{errors:?}")))?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| PersonError::catalog(tag, format!("{errors:?}")))?;

        Ok(Self { locale, bundle })
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Renders one error.
    ///
    /// Falls back to the error's English `Display` text if the catalog has
    /// no usable message for it.
    pub fn render(&self, error: &FieldError) -> String {
        let (id, args) = message_for(error);

        let Some(pattern) = self.bundle.get_message(id).and_then(|m| m.value()) else {
            warn!(message_id = id, locale = %self.locale, "missing message");
            return error.to_string();
        };

        let mut errors = Vec::new();
        let text = self.bundle.format_pattern(pattern, args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!(message_id = id, ?errors, "message formatting failed");
            return error.to_string();
        }

        text.into_owned()
    }

    /// Renders every error, keyed by field
    pub fn render_all(&self, errors: &FieldErrors) -> BTreeMap<Field, String> {
        errors
            .iter()
            .map(|(field, error)| (field, self.render(error)))
            .collect()
    }
}

fn message_for(error: &FieldError) -> (&'static str, Option<FluentArgs<'static>>) {
    match error {
        FieldError::NameRequired => ("name-required", None),
        FieldError::NationalIdInvalid => ("national-id-invalid", None),
        FieldError::BirthDateRequired => ("birth-date-required", None),
        FieldError::BirthDateUnreadable => ("birth-date-unreadable", None),
        FieldError::BelowMinimumAge { minimum } => {
            let mut args = FluentArgs::new();
            args.set("minimum", *minimum);
            ("age-below-minimum", Some(args))
        }
        FieldError::AboveMaximumAge { maximum } => {
            let mut args = FluentArgs::new();
            args.set("maximum", *maximum);
            ("age-above-maximum", Some(args))
        }
        FieldError::EmailInvalid => ("email-invalid", None),
        FieldError::PostalCodeInvalid => ("postal-code-invalid", None),
        FieldError::PostalCodeNotFound => ("postal-code-not-found", None),
        FieldError::PostalCodeLookupFailed => ("postal-code-lookup-failed", None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ERRORS: [FieldError; 10] = [
        FieldError::NameRequired,
        FieldError::NationalIdInvalid,
        FieldError::BirthDateRequired,
        FieldError::BirthDateUnreadable,
        FieldError::BelowMinimumAge { minimum: 16 },
        FieldError::AboveMaximumAge { maximum: 100 },
        FieldError::EmailInvalid,
        FieldError::PostalCodeInvalid,
        FieldError::PostalCodeNotFound,
        FieldError::PostalCodeLookupFailed,
    ];

    #[test]
    fn test_portuguese_messages() {
        let localizer = Localizer::new("pt-BR").unwrap();
        assert_eq!(localizer.render(&FieldError::NameRequired), "Nome é obrigatório");
        assert_eq!(localizer.render(&FieldError::NationalIdInvalid), "CPF inválido");
        assert_eq!(
            localizer.render(&FieldError::BirthDateRequired),
            "Data de nascimento é obrigatória"
        );
        assert_eq!(localizer.render(&FieldError::EmailInvalid), "E-mail inválido");
        assert_eq!(localizer.render(&FieldError::PostalCodeInvalid), "CEP inválido");
        assert_eq!(localizer.render(&FieldError::PostalCodeNotFound), "CEP não encontrado");
        assert_eq!(localizer.render(&FieldError::PostalCodeLookupFailed), "Erro ao buscar CEP");
    }

    #[test]
    fn test_age_bounds_interpolated() {
        let localizer = Localizer::new("pt-BR").unwrap();
        assert_eq!(
            localizer.render(&FieldError::BelowMinimumAge { minimum: 16 }),
            "Idade mínima permitida é 16 anos"
        );
        assert_eq!(
            localizer.render(&FieldError::AboveMaximumAge { maximum: 100 }),
            "Idade máxima permitida é 100 anos"
        );
    }

    #[test]
    fn test_english_by_language() {
        let localizer = Localizer::new("en").unwrap();
        assert_eq!(localizer.locale().to_string(), "en-US");
        assert_eq!(localizer.render(&FieldError::NameRequired), "Name is required");
        assert_eq!(
            localizer.render(&FieldError::BelowMinimumAge { minimum: 18 }),
            "Minimum allowed age is 18 years"
        );
    }

    #[test]
    fn test_unsupported_locale_falls_back() {
        let localizer = Localizer::new("de-DE").unwrap();
        assert_eq!(localizer.locale().to_string(), DEFAULT_LOCALE);
    }

    #[test]
    fn test_malformed_locale_rejected() {
        assert!(matches!(
            Localizer::new("not a locale!"),
            Err(PersonError::InvalidLocale(_))
        ));
    }

    #[test]
    fn test_every_error_has_a_message_in_every_catalog() {
        for (tag, _) in CATALOGS {
            let localizer = Localizer::new(tag).unwrap();
            for error in &ALL_ERRORS {
                let (id, _) = message_for(error);
                assert!(localizer.bundle.has_message(id), "{tag} lacks {id}");
            }
        }
    }

    #[test]
    fn test_render_all_keys_by_field() {
        let mut errors = FieldErrors::new();
        errors.set(FieldError::NameRequired);
        errors.set(FieldError::PostalCodeInvalid);

        let rendered = Localizer::new("pt-BR").unwrap().render_all(&errors);
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[&Field::Name], "Nome é obrigatório");
        assert_eq!(rendered[&Field::PostalCode], "CEP inválido");
    }
}
