//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. The configuration file path defaults to `config.yaml` but can be
//! specified via the `-f` flag or the `REVIEWD_CONFIG` environment variable.
//!
//! ## Loading priority
//!
//! Sources are merged in order (later sources override earlier ones):
//!
//! 1. **YAML config file** - base configuration (default: `config.yaml`)
//! 2. **Environment variables** - variables prefixed with `REVIEWD_`
//! 3. **DATABASE_URL** - special case: overrides `database.url` if set
//!
//! For nested values, use double underscores in environment variables, e.g.
//! `REVIEWD_DATABASE__URL=sqlite://reviews.db`.
//!
//! ## Example
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 8080
//! database:
//!   url: sqlite://reviews.db
//!   pool:
//!     max_connections: 5
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

/// Simple CLI args - just for specifying the config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "REVIEWD_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// Loaded from YAML and environment variables; all fields have defaults so
/// the server starts with no config file present.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Deprecated-style escape hatch: `DATABASE_URL` lands here and overrides
    /// `database.url` during [`Config::load`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// CORS settings for browser clients
    pub cors: CorsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: None,
            database: DatabaseConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

/// Database configuration: connection string plus pool settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite connection string. The database file is created on first start.
    pub url: String,
    /// Connection pool settings
    pub pool: PoolSettings,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://reviews.db".to_string(),
            pool: PoolSettings::default(),
        }
    }
}

/// Connection pool settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSettings {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Maximum time to wait for a connection (seconds)
    pub acquire_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout_secs: 30,
        }
    }
}

/// CORS configuration for browser clients.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins. The single entry `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Config {
    /// Build the figment for this configuration (YAML file + env overrides).
    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("REVIEWD_").split("__"))
            // Common DATABASE_URL pattern
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    /// Load configuration from file and environment, apply the `DATABASE_URL`
    /// override, and validate.
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        // DATABASE_URL takes precedence over anything in the config file
        if let Some(url) = config.database_url.take() {
            config.database.url = url;
        }

        config.validate().map_err(figment::Error::from)?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.is_empty() {
            return Err("database.url must not be empty".to_string());
        }
        if !self.database.url.starts_with("sqlite:") {
            return Err(format!(
                "database.url must be a sqlite:// connection string, got {:?}",
                self.database.url
            ));
        }
        if self.database.pool.max_connections == 0 {
            return Err("database.pool.max_connections must be at least 1".to_string());
        }
        Ok(())
    }

    /// The address the HTTP server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
