//! Person Domain Ports
//!
//! This module defines the port interface for the postal-code lookup
//! service. The domain only needs two outcomes from it: an address, or a
//! failure (not found, or the service could not answer).
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_person::ports::PostalCodePort;
//! use std::sync::Arc;
//!
//! pub struct RegistrationService {
//!     postal_codes: Arc<dyn PostalCodePort>,
//! }
//! ```
//!
//! # Configuration
//!
//! The adapter is chosen at application startup:
//!
//! ```rust,ignore
//! let port: Arc<dyn PostalCodePort> = Arc::new(ViaCepAdapter::new(config)?);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, OperationMetadata};

use crate::error::LookupError;
use crate::person::{Address, PostalCode};

/// Port for resolving postal codes to addresses
#[async_trait]
pub trait PostalCodePort: DomainPort + HealthCheckable {
    /// Resolves a complete postal code
    ///
    /// # Arguments
    ///
    /// * `postal_code` - The eight-digit code to resolve
    /// * `metadata` - Optional operation metadata for tracing
    ///
    /// # Returns
    ///
    /// The address, `LookupError::NotFound` when the service knows no
    /// address for the code, or `LookupError::Port` when it could not answer
    async fn lookup(
        &self,
        postal_code: &PostalCode,
        metadata: Option<OperationMetadata>,
    ) -> Result<Address, LookupError>;
}

/// Mock implementation of PostalCodePort for testing
///
/// Resolves codes from an in-memory table and can be switched into a
/// failing mode to simulate an unreachable service.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use std::time::Instant;

    use core_kernel::{AdapterHealth, HealthCheckResult, PortError};

    /// In-memory mock implementation of PostalCodePort
    #[derive(Debug, Default)]
    pub struct MockPostalCodePort {
        addresses: Arc<RwLock<HashMap<PostalCode, Address>>>,
        unavailable: AtomicBool,
        calls: AtomicUsize,
    }

    impl MockPostalCodePort {
        /// Creates a new mock port with no known codes
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with addresses for testing
        pub async fn with_addresses(addresses: Vec<(PostalCode, Address)>) -> Self {
            let port = Self::new();
            for (code, address) in addresses {
                port.insert(code, address).await;
            }
            port
        }

        /// Registers an address for a code
        pub async fn insert(&self, postal_code: PostalCode, address: Address) {
            self.addresses.write().await.insert(postal_code, address);
        }

        /// Makes every lookup fail with a connection error
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::Relaxed);
        }

        /// Number of lookups performed so far
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl DomainPort for MockPostalCodePort {}

    #[async_trait]
    impl HealthCheckable for MockPostalCodePort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.unavailable.load(Ordering::Relaxed) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };

            HealthCheckResult::new("mock-postal-code-port", status, Instant::now())
        }
    }

    #[async_trait]
    impl PostalCodePort for MockPostalCodePort {
        async fn lookup(
            &self,
            postal_code: &PostalCode,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Address, LookupError> {
            self.calls.fetch_add(1, Ordering::Relaxed);

            if self.unavailable.load(Ordering::Relaxed) {
                return Err(PortError::connection("mock postal-code service unavailable").into());
            }

            self.addresses
                .read()
                .await
                .get(postal_code)
                .cloned()
                .ok_or_else(|| LookupError::NotFound(postal_code.clone()))
        }
    }

}
