//! Versioned REST API over the task lifecycle service.
//!
//! - Wire representation in [`dto`]
//! - Error-to-response mapping in [`error`]
//! - Routes and handlers in [`routes`]
//! - Listener lifecycle in [`server`]

pub mod dto;
pub mod error;
mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{API_PREFIX, router};
pub use server::serve;
