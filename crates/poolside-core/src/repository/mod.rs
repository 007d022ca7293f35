//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (poolside-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod reservation;
pub mod schedule;
pub mod user;
