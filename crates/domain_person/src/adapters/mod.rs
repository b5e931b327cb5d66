//! External Adapters for the Person Domain
//!
//! Adapter implementations of the `PostalCodePort` trait.
//!
//! # Available Adapters
//!
//! - **ViaCepAdapter**: Resolves Brazilian postal codes through the ViaCEP REST API
//! - **MockPostalCodePort**: In-memory mock for testing (re-exported from ports module)
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_person::adapters::{ViaCepAdapter, ViaCepConfig};
//! use domain_person::PostalCodePort;
//! use std::sync::Arc;
//!
//! let adapter = ViaCepAdapter::new(ViaCepConfig::default())?;
//! let port: Arc<dyn PostalCodePort> = Arc::new(adapter);
//! ```

mod circuit_breaker;
pub mod viacep;

pub use viacep::{ViaCepAdapter, ViaCepConfig};
