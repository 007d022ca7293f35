//! Observability for Poolside: log subscriber setup and optional trace export.

pub mod tracing_setup;
