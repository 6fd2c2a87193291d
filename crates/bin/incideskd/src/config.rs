//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `incidesk.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use incidesk_adapter_http_axum::body::DEFAULT_BODY_LIMIT;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Largest request body accepted, in bytes.
    pub body_limit: usize,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// Name of the `user-provided` entry in `VCAP_SERVICES` whose
    /// `credentials.uri` supplies the database URL.
    pub service_name: String,
    /// Create missing tables and views on startup.
    pub bootstrap_schema: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// The part of a `VCAP_SERVICES` document we read.
#[derive(Debug, Deserialize)]
struct ServiceBindings {
    #[serde(rename = "user-provided", default)]
    user_provided: Vec<ServiceBinding>,
}

#[derive(Debug, Deserialize)]
struct ServiceBinding {
    name: String,
    #[serde(default)]
    credentials: Option<Credentials>,
}

#[derive(Debug, Deserialize)]
struct Credentials {
    uri: Option<String>,
}

impl Config {
    /// Load configuration from `incidesk.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, if
    /// `VCAP_SERVICES` is not valid JSON, or if the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("incidesk.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides read through `var`.
    ///
    /// The database URL comes from, in increasing precedence: the file, the
    /// `VCAP_SERVICES` binding, `INCIDESK_DATABASE_URL`.
    fn apply_env_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("INCIDESK_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("PORT") {
            self.server.port = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("invalid PORT {val:?}")))?;
        }
        if let Some(val) = var("VCAP_SERVICES")
            && let Some(uri) = bound_database_uri(&val, &self.database.service_name)?
        {
            self.database.url = uri;
        }
        if let Some(val) = var("INCIDESK_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("INCIDESK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.server.body_limit == 0 {
            return Err(ConfigError::Validation(
                "body limit must be non-zero".to_string(),
            ));
        }
        if self.database.url.is_empty() {
            return Err(ConfigError::Validation(
                "database url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

/// `credentials.uri` of the first `user-provided` binding named `service`.
fn bound_database_uri(raw: &str, service: &str) -> Result<Option<String>, ConfigError> {
    let bindings: ServiceBindings =
        serde_json::from_str(raw).map_err(ConfigError::ServiceBinding)?;
    Ok(bindings
        .user_provided
        .into_iter()
        .find(|binding| binding.name == service)
        .and_then(|binding| binding.credentials)
        .and_then(|credentials| credentials.uri))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:incidesk.db".to_string(),
            service_name: "incidesk-db".to_string(),
            bootstrap_schema: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "incideskd=info,incidesk=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// `VCAP_SERVICES` is not the expected JSON document.
    #[error("failed to parse VCAP_SERVICES")]
    ServiceBinding(#[source] serde_json::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
