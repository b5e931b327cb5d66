//! Person domain errors
//!
//! Field validation never fails with an error type; it produces a
//! `FieldErrors` map. The errors here cover the operations around it.

use thiserror::Error;

use core_kernel::{CoreError, PortError};

use crate::person::PostalCode;

/// Errors that can occur in the person domain
#[derive(Debug, Error)]
pub enum PersonError {
    /// Roster index past the end
    #[error("No roster entry at index {index} (roster has {len} entries)")]
    RosterIndexOutOfRange { index: usize, len: usize },

    /// A message catalog failed to load
    #[error("Invalid message catalog for {locale}: {message}")]
    MessageCatalog { locale: String, message: String },

    /// Unknown or malformed locale tag
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Kernel error, e.g. an adapter with unusable settings
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PersonError {
    pub fn catalog(locale: impl Into<String>, message: impl Into<String>) -> Self {
        PersonError::MessageCatalog {
            locale: locale.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a failed postal-code lookup
#[derive(Debug, Error)]
pub enum LookupError {
    /// The service answered but knows no address for the code
    #[error("Postal code {0} not found")]
    NotFound(PostalCode),

    /// The service could not be reached or answered unexpectedly
    #[error(transparent)]
    Port(#[from] PortError),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}
