//! # topos-observability
//!
//! Structured tracing: subscriber setup driven by [`ObservabilityConfig`],
//! span macros per operation, and structured log events.
//!
//! [`ObservabilityConfig`]: topos_core::config::ObservabilityConfig

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_filter, LOG_ENV_VAR};
