//! HTTP/REST API layer for Poolside.
//!
//! Axum-based REST API under `/api/` with bearer-token authentication and
//! the registry-driven response envelope.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
