//! Logs and metrics.
//!
//! `logging` installs the tracing subscriber once at startup. `metrics`
//! wraps the `metrics` facade with one function per event the API emits;
//! the Prometheus exporter is only installed when configured, so in tests
//! every recording call is a no-op.

pub mod logging;
pub mod metrics;
