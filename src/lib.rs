//! Tasklane: task tracking service.
//!
//! This crate provides the task lifecycle core (validation, status
//! transitions, persistence contract) and the versioned REST API that exposes
//! it to the browser client.
//!
//! # Architecture
//!
//! Tasklane follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task entity, validation, persistence contract, and service
//! - [`api`]: HTTP routes and wire representation
//! - [`config`]: Command-line and file configuration
//! - [`logging`]: Tracing subscriber setup

pub mod api;
pub mod config;
pub mod logging;
pub mod task;
