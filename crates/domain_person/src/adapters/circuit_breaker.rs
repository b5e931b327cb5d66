//! Circuit breaker shared by HTTP adapters
//!
//! Closed: requests flow and consecutive failures are counted. Reaching the
//! failure threshold opens the circuit and requests are refused until the
//! reset timeout elapses. After that the circuit is half-open: requests are
//! let through, one failure re-opens it, and enough successes close it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;

use core_kernel::CircuitBreakerConfig;

#[derive(Debug)]
pub(crate) struct CircuitBreaker {
    config: CircuitBreakerConfig,
    consecutive_failures: AtomicU32,
    half_open_successes: AtomicU32,
    opened_at: RwLock<Option<Instant>>,
}

impl CircuitBreaker {
    pub(crate) fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            consecutive_failures: AtomicU32::new(0),
            half_open_successes: AtomicU32::new(0),
            opened_at: RwLock::new(None),
        }
    }

    /// Returns true if a request may be sent now
    pub(crate) async fn allows_request(&self) -> bool {
        match *self.opened_at.read().await {
            None => true,
            Some(opened) => opened.elapsed() >= self.config.reset_timeout(),
        }
    }

    /// Returns true while the circuit is open or half-open
    pub(crate) async fn is_open(&self) -> bool {
        self.opened_at.read().await.is_some()
    }

    pub(crate) async fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::Relaxed);

        let mut opened_at = self.opened_at.write().await;
        if opened_at.is_none() {
            return;
        }

        let successes = self.half_open_successes.fetch_add(1, Ordering::Relaxed) + 1;
        if successes >= self.config.success_threshold {
            *opened_at = None;
            self.half_open_successes.store(0, Ordering::Relaxed);
        }
    }

    pub(crate) async fn record_failure(&self) {
        self.half_open_successes.store(0, Ordering::Relaxed);

        let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        let mut opened_at = self.opened_at.write().await;
        if failures >= self.config.failure_threshold || opened_at.is_some() {
            *opened_at = Some(Instant::now());
        }
    }
}
