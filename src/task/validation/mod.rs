//! Validation stage for task requests.
//!
//! Rules in [`rules`] check one field each. [`TaskValidator`] runs the rules
//! that apply to a request and collects every failure, in field order, so a
//! caller sees all problems at once. Nothing here touches storage.

mod error;
pub mod rules;
mod validator;

pub use error::{TaskValidationError, ValidationFailures, ValidationResult};
pub use rules::{MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS};
pub use validator::TaskValidator;
