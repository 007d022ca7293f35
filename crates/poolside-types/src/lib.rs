//! Shared domain types for Poolside.
//!
//! Users, swimming schedules, reservations and payment records, the request
//! and partial-update shapes the API accepts for them, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod auth;
pub mod config;
pub mod error;
pub mod reservation;
pub mod schedule;
pub mod user;
