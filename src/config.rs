//! Command-line and file configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! command-line flags (which may also come from the environment).

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage engine backing the task repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local store; contents are lost on exit.
    #[default]
    Memory,
    /// `PostgreSQL` via a connection pool.
    Postgres,
}

/// Tasklane task API server.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Socket address to listen on (overrides config)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// Storage backend (overrides config)
    #[arg(short, long, value_enum)]
    pub storage: Option<StorageBackend>,

    /// `PostgreSQL` connection URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections (overrides config)
    #[arg(long)]
    pub pool_size: Option<u32>,

    /// Default log level when `RUST_LOG` is unset (overrides config)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

/// Errors raised while assembling the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`ServerConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// `PostgreSQL` storage was selected without a connection URL.
    #[error("postgres storage requires a database URL (--database-url or DATABASE_URL)")]
    MissingDatabaseUrl,

    /// The connection pool size is zero.
    #[error("pool size must be at least 1")]
    InvalidPoolSize,
}

/// Effective server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: SocketAddr,
    /// Storage backend.
    pub storage: StorageBackend,
    /// `PostgreSQL` connection URL, required for [`StorageBackend::Postgres`].
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: u32,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl ServerConfig {
    /// Default listen address.
    pub const DEFAULT_BIND: SocketAddr =
        SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 8080);
    /// Default pool size.
    pub const DEFAULT_POOL_SIZE: u32 = 10;

    /// Resolves the configuration from defaults, the file named by `cli`,
    /// and the flags in `cli`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be loaded or the result
    /// is inconsistent.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let base = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML file; keys it omits keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies every flag present in `cli` on top of `self`.
    #[must_use]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(bind) = cli.bind {
            self.bind = bind;
        }
        if let Some(storage) = cli.storage {
            self.storage = storage;
        }
        if let Some(url) = &cli.database_url {
            self.database_url = Some(url.clone());
        }
        if let Some(pool_size) = cli.pool_size {
            self.pool_size = pool_size;
        }
        if let Some(level) = &cli.log_level {
            self.log_level.clone_from(level);
        }
        self
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] or
    /// [`ConfigError::InvalidPoolSize`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidPoolSize);
        }
        if self.storage == StorageBackend::Postgres && self.database_url().is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(())
    }

    /// Returns the non-blank database URL, if any.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: Self::DEFAULT_BIND,
            storage: StorageBackend::default(),
            database_url: None,
            pool_size: Self::DEFAULT_POOL_SIZE,
            log_level: "info".to_owned(),
        }
    }
}
