//! Task lifecycle management.
//!
//! Tasks are created in the not-started status, edited field-wise, moved
//! between statuses, and hard-deleted. Every operation validates its input
//! before touching storage and commits at most once. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Request validation in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
