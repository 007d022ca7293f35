//! Credential and token cryptography for Poolside.
//!
//! - `password`: PBKDF2-HMAC-SHA512 credential records
//! - `token`: HS256 bearer tokens

pub mod password;
pub mod token;
