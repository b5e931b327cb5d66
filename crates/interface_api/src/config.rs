//! API configuration

use serde::Deserialize;

use core_kernel::CircuitBreakerConfig;
use domain_person::{ViaCepConfig, DEFAULT_LOCALE};

/// API configuration
///
/// Every field can be set through an `APP_`-prefixed environment variable,
/// e.g. `APP_PORT=9000` or `APP_VIACEP_TIMEOUT_SECS=5`. Missing values keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Locale for field-error messages
    pub locale: String,
    /// ViaCEP base URL, without the postal code path
    pub viacep_base_url: String,
    /// ViaCEP request timeout in seconds
    pub viacep_timeout_secs: u64,
    /// Consecutive lookup failures before the circuit opens
    pub circuit_failure_threshold: u32,
    /// Seconds the circuit stays open
    pub circuit_reset_timeout_secs: u64,
    /// Half-open successes needed to close the circuit
    pub circuit_success_threshold: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let viacep = ViaCepConfig::default();
        let breaker = CircuitBreakerConfig::default();

        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_json: false,
            locale: DEFAULT_LOCALE.to_string(),
            viacep_base_url: viacep.base_url,
            viacep_timeout_secs: viacep.timeout_secs,
            circuit_failure_threshold: breaker.failure_threshold,
            circuit_reset_timeout_secs: breaker.reset_timeout_secs,
            circuit_success_threshold: breaker.success_threshold,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `APP_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::with_prefix("APP").try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the ViaCEP adapter; a zero failure threshold disables
    /// the circuit breaker
    pub fn viacep(&self) -> ViaCepConfig {
        let circuit_breaker = (self.circuit_failure_threshold > 0).then(|| CircuitBreakerConfig {
            failure_threshold: self.circuit_failure_threshold,
            reset_timeout_secs: self.circuit_reset_timeout_secs,
            success_threshold: self.circuit_success_threshold,
        });

        ViaCepConfig {
            base_url: self.viacep_base_url.clone(),
            timeout_secs: self.viacep_timeout_secs,
            circuit_breaker,
        }
    }
}
