//! Port and adapter plumbing
//!
//! Domain crates declare their outbound ports as traits extending
//! [`DomainPort`] and [`HealthCheckable`]. Adapters report failures as
//! [`PortError`] so callers can tell a flaky service from a broken payload,
//! and external adapters take their circuit-breaker settings from
//! [`CircuitBreakerConfig`].

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of an outbound port call
///
/// "Not found" is a domain answer and is modelled by each port's own error
/// type, not here.
#[derive(Debug, Error)]
pub enum PortError {
    /// The request never got an answer
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The service answered with a server error, or the circuit is open
    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    /// The service answered with a status the adapter does not handle
    #[error("Unexpected status {status}: {service}")]
    UnexpectedStatus { service: String, status: u16 },

    /// The answer could not be decoded
    #[error("Transformation error: {message}")]
    Transformation { message: String },
}

impl PortError {
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn timeout(operation: impl Into<String>, after: Duration) -> Self {
        PortError::Timeout {
            operation: operation.into(),
            duration_ms: after.as_millis() as u64,
        }
    }

    pub fn service_unavailable(service: impl Into<String>) -> Self {
        PortError::ServiceUnavailable {
            service: service.into(),
        }
    }

    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Returns true if the same call may succeed later
    ///
    /// Only transient failures count toward opening a circuit.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::RateLimited { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }
}

/// Marker trait for domain ports: shareable across tasks
pub trait DomainPort: Send + Sync + 'static {}

/// Circuit breaker settings for an external adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before the circuit opens
    pub failure_threshold: u32,
    /// Seconds the circuit stays open before letting a trial call through
    pub reset_timeout_secs: u64,
    /// Successful trial calls needed to close the circuit again
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            reset_timeout_secs: 30,
            success_threshold: 3,
        }
    }
}

impl CircuitBreakerConfig {
    pub fn reset_timeout(&self) -> Duration {
        Duration::from_secs(self.reset_timeout_secs)
    }
}

/// Health of an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    /// Answering, but on probation (half-open circuit)
    Degraded,
    /// Refusing calls
    Unhealthy,
}

/// Result of an adapter health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    /// Builds a result for a check that began at `started`
    pub fn new(adapter_id: impl Into<String>, status: AdapterHealth, started: Instant) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status,
            latency_ms: started.elapsed().as_millis() as u64,
            message: None,
            checked_at: Utc::now(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Adapters that can report their own health
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

/// Per-call context passed through ports for tracing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationMetadata {
    /// Request id of the inbound call, carried into adapter logs
    pub correlation_id: Option<String>,
}

impl OperationMetadata {
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
        }
    }

    /// Correlation id of optional metadata, for span fields
    pub fn correlation_id_of(metadata: Option<&OperationMetadata>) -> Option<&str> {
        metadata.and_then(|m| m.correlation_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors_count_against_circuit() {
        assert!(PortError::connection("refused").is_transient());
        assert!(PortError::timeout("lookup", Duration::from_secs(10)).is_transient());
        assert!(PortError::RateLimited { retry_after_secs: 60 }.is_transient());
        assert!(PortError::service_unavailable("ViaCEP answered 503").is_transient());

        assert!(!PortError::transformation("unexpected payload").is_transient());
        let status = PortError::UnexpectedStatus {
            service: "ViaCEP".to_string(),
            status: 418,
        };
        assert!(!status.is_transient());
    }

    #[test]
    fn test_timeout_reports_milliseconds() {
        let error = PortError::timeout("postal code lookup", Duration::from_secs(2));
        assert_eq!(error.to_string(), "Timeout after 2000ms: postal code lookup");
    }

    #[test]
    fn test_circuit_breaker_config_default() {
        let config = CircuitBreakerConfig::default();
        assert_eq!(config.failure_threshold, 5);
        assert_eq!(config.success_threshold, 3);
        assert_eq!(config.reset_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_health_check_result() {
        let result =
            HealthCheckResult::new("viacep-adapter", AdapterHealth::Degraded, Instant::now())
                .with_message("Circuit breaker is half-open");

        assert!(!result.is_healthy());
        assert_eq!(result.message.as_deref(), Some("Circuit breaker is half-open"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "degraded");
    }

    #[test]
    fn test_correlation_id_of() {
        let metadata = OperationMetadata::with_correlation_id("req-123");
        assert_eq!(OperationMetadata::correlation_id_of(Some(&metadata)), Some("req-123"));
        assert_eq!(OperationMetadata::correlation_id_of(None), None);
        assert_eq!(
            OperationMetadata::correlation_id_of(Some(&OperationMetadata::default())),
            None
        );
    }
}
