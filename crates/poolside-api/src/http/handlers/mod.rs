//! HTTP request handlers for the REST API.
//!
//! Each handler answers with exactly one message category: its success
//! category, the expected failure the service reported, or the operation's
//! 500 fallback.

pub mod auth;
pub mod reservation;
pub mod schedule;
pub mod user;
