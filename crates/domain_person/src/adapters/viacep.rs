//! ViaCEP Adapter
//!
//! Resolves Brazilian postal codes through the public ViaCEP REST API
//! (`GET {base_url}/{digits}/json/`).
//!
//! # Error Handling
//!
//! Responses are mapped to lookup outcomes:
//! - 200 with an address -> `Ok(Address)`
//! - 200 with `"erro": true` -> `LookupError::NotFound`
//! - 400/404 -> `LookupError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Other non-success statuses -> `PortError::UnexpectedStatus`
//! - Timeouts -> `PortError::Timeout`
//! - Connection failures -> `PortError::Connection`
//! - Undecodable bodies -> `PortError::Transformation`
//!
//! Lookups are never retried. Transport failures and 5xx answers count
//! towards the circuit breaker; not-found answers do not.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, field, instrument, warn, Span};

use core_kernel::{
    AdapterHealth, CircuitBreakerConfig, CoreError, DomainPort, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError,
};

use super::circuit_breaker::CircuitBreaker;
use crate::error::{LookupError, PersonError};
use crate::person::{Address, PostalCode};
use crate::ports::PostalCodePort;

const ADAPTER_ID: &str = "viacep-adapter";

/// Configuration for the ViaCEP adapter
#[derive(Debug, Clone)]
pub struct ViaCepConfig {
    /// Base URL of the API, without the trailing postal code path
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Circuit breaker configuration; `None` disables the breaker
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for ViaCepConfig {
    fn default() -> Self {
        Self {
            base_url: "https://viacep.com.br/ws".to_string(),
            timeout_secs: 10,
            circuit_breaker: Some(CircuitBreakerConfig::default()),
        }
    }
}

/// ViaCEP response body.
///
/// Unknown codes come back as `{"erro": true}`; some deployments send the
/// flag as the string `"true"`.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

impl ViaCepResponse {
    fn is_not_found(&self) -> bool {
        match &self.erro {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag != "false",
            Some(_) => true,
        }
    }

    fn into_address(self) -> Address {
        Address {
            street: self.logradouro,
            neighborhood: self.bairro,
            city: self.localidade,
            region: self.uf,
        }
    }
}

/// ViaCEP adapter implementing the PostalCodePort trait
///
/// # Example
///
/// ```rust,ignore
/// use domain_person::adapters::{ViaCepAdapter, ViaCepConfig};
///
/// let adapter = ViaCepAdapter::new(ViaCepConfig::default())?;
/// let address = adapter.lookup(&postal_code, None).await?;
/// ```
#[derive(Debug)]
pub struct ViaCepAdapter {
    config: ViaCepConfig,
    http: reqwest::Client,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
}

impl ViaCepAdapter {
    /// Creates a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is not HTTP(S), the
    /// timeout is zero, or the HTTP client cannot be built
    pub fn new(config: ViaCepConfig) -> Result<Self, PersonError> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(CoreError::configuration(format!(
                "ViaCEP base URL must be http(s): {}",
                config.base_url
            ))
            .into());
        }
        if config.timeout_secs == 0 {
            return Err(CoreError::configuration("ViaCEP timeout must be positive").into());
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::configuration(format!("ViaCEP client: {e}")))?;

        let circuit_breaker = config
            .circuit_breaker
            .clone()
            .map(|cb| Arc::new(CircuitBreaker::new(cb)));

        Ok(Self {
            config,
            http,
            circuit_breaker,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Checks if the circuit breaker is open (blocking requests)
    pub async fn is_circuit_open(&self) -> bool {
        match self.circuit_breaker {
            Some(ref cb) => !cb.allows_request().await,
            None => false,
        }
    }

    fn lookup_url(&self, postal_code: &PostalCode) -> String {
        format!(
            "{}/{}/json/",
            self.config.base_url.trim_end_matches('/'),
            postal_code.digits()
        )
    }

    fn transport_error(&self, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::timeout(
                "postal code lookup",
                Duration::from_secs(self.config.timeout_secs),
            )
        } else {
            PortError::Connection {
                message: format!("ViaCEP request failed: {error}"),
                source: Some(Box::new(error)),
            }
        }
    }

    async fn record(&self, failed: bool) {
        if let Some(ref cb) = self.circuit_breaker {
            if failed {
                cb.record_failure().await;
            } else {
                cb.record_success().await;
            }
        }
    }

    async fn fetch(&self, postal_code: &PostalCode) -> Result<Address, LookupError> {
        let response = self
            .http
            .get(self.lookup_url(postal_code))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        match status {
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                return Err(LookupError::NotFound(postal_code.clone()));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);
                return Err(PortError::RateLimited { retry_after_secs }.into());
            }
            s if s.is_server_error() => {
                return Err(PortError::service_unavailable(format!("ViaCEP answered {s}")).into());
            }
            s if !s.is_success() => {
                return Err(PortError::UnexpectedStatus {
                    service: "ViaCEP".to_string(),
                    status: s.as_u16(),
                }
                .into());
            }
            _ => {}
        }

        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(|e| PortError::transformation(format!("undecodable ViaCEP response: {e}")))?;

        if body.is_not_found() {
            return Err(LookupError::NotFound(postal_code.clone()));
        }

        Ok(body.into_address())
    }
}

impl DomainPort for ViaCepAdapter {}

#[async_trait]
impl HealthCheckable for ViaCepAdapter {
    /// Reports the circuit state without calling the service
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        let (status, message) = match self.circuit_breaker {
            Some(ref cb) if !cb.allows_request().await => {
                (AdapterHealth::Unhealthy, Some("Circuit breaker is open".to_string()))
            }
            Some(ref cb) if cb.is_open().await => {
                (AdapterHealth::Degraded, Some("Circuit breaker is half-open".to_string()))
            }
            _ => (AdapterHealth::Healthy, None),
        };

        let result = HealthCheckResult::new(ADAPTER_ID, status, start);
        match message {
            Some(message) => result.with_message(message),
            None => result,
        }
    }
}

#[async_trait]
impl PostalCodePort for ViaCepAdapter {
    #[instrument(
        skip(self, postal_code, metadata),
        fields(
            postal_code = %postal_code,
            correlation_id = field::Empty
        )
    )]
    async fn lookup(
        &self,
        postal_code: &PostalCode,
        metadata: Option<OperationMetadata>,
    ) -> Result<Address, LookupError> {
        if let Some(id) = OperationMetadata::correlation_id_of(metadata.as_ref()) {
            Span::current().record("correlation_id", id);
        }

        if self.is_circuit_open().await {
            warn!("circuit breaker open, refusing lookup");
            return Err(PortError::service_unavailable("Circuit breaker is open").into());
        }

        let result = self.fetch(postal_code).await;

        let failed = matches!(&result, Err(LookupError::Port(e)) if e.is_transient());
        self.record(failed).await;

        match &result {
            Ok(_) => debug!("postal code resolved"),
            Err(LookupError::NotFound(_)) => debug!("postal code not found"),
            Err(LookupError::Port(error)) => warn!(%error, "postal code lookup failed"),
        }

        result
    }
}
