//! Configuration management for the server

use crate::{Error, Result};
use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

const ENV_PREFIX: &str = "BLOG_APP";
const ENV_SEPARATOR: &str = "__";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub migrate_on_startup: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `json` or `pretty`
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "sqlite:./blog_app.db".to_string(),
                max_connections: Some(10),
                migrate_on_startup: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment and config files
    pub fn load() -> std::result::Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        Self::finish(builder)
    }

    /// Load configuration from an explicit file, still honouring environment overrides
    pub fn load_from_file(path: &str) -> std::result::Result<Self, ConfigError> {
        let builder = config::Config::builder().add_source(File::with_name(path).required(true));

        Self::finish(builder)
    }

    fn finish(
        builder: ConfigBuilder<DefaultState>,
    ) -> std::result::Result<Self, ConfigError> {
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite:./blog_app.db")?
            .set_default("database.migrate_on_startup", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .build()?;

        settings.try_deserialize()
    }

    /// Get the server socket address
    pub fn server_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                Error::Configuration(format!(
                    "Invalid server address {}:{}: {}",
                    self.server.host, self.server.port, e
                ))
            })
    }

    /// Storage settings in the form the storage crate expects
    pub fn storage_config(&self) -> blog_app_storage::DatabaseConfig {
        blog_app_storage::DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            migrate_on_startup: self.database.migrate_on_startup,
        }
    }
}
