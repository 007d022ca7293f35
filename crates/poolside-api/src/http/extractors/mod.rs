//! Request extractors: bearer authentication, role guards and body/query parsing.

pub mod auth;
pub mod json;
pub mod query;
