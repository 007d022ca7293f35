//! Infrastructure layer for Poolside.
//!
//! Contains implementations of the ports defined in `poolside-core`: SQLite
//! repositories, the PBKDF2 credential hasher and the JWT issuer, plus
//! configuration loading.

pub mod config;
pub mod crypto;
pub mod sqlite;
