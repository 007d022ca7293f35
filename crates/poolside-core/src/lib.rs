//! Core of Poolside: the message registry, repository traits and services.
//!
//! This crate defines the "ports" (repository, hasher and token traits) that
//! the infrastructure layer implements. It depends only on `poolside-types`
//! -- never on `poolside-infra` or any database/IO crate.

pub mod message;
pub mod repository;
pub mod service;
