//! Core Kernel - Foundational types and utilities for the person registry
//!
//! This crate provides the building blocks shared by the domain and interface crates:
//! - Port/adapter infrastructure (errors, health checks, circuit breaker settings)
//! - Calendar helpers and an injectable clock for "today"
//! - The kernel error type

pub mod temporal;
pub mod ports;
pub mod error;

pub use temporal::{Clock, SystemClock, FixedClock, TemporalError, parse_iso_date};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
    CircuitBreakerConfig, OperationMetadata,
};
pub use error::CoreError;
