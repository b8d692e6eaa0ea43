//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured level does not parse as a filter directive.
    #[error("invalid log filter '{directives}': {source}")]
    InvalidFilter {
        /// Directives that failed to parse.
        directives: String,
        /// Parser error.
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Returns the filter directives used when `RUST_LOG` is unset.
#[must_use]
pub fn default_directives(level: &str) -> String {
    format!("tasklane={level},tower_http={level},warn")
}

fn fallback_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let directives = default_directives(level);
    EnvFilter::try_new(&directives)
        .map_err(|source| LoggingError::InvalidFilter { directives, source })
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise [`default_directives`] is built
/// from `level`.
///
/// # Errors
///
/// Returns [`LoggingError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init(level: &str) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| fallback_filter(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;
    Ok(())
}
