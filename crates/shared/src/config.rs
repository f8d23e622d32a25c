//! Application configuration management.
//!
//! Configuration is loaded once at startup into an immutable [`AppConfig`]
//! and handed to the services that need it.

use std::fmt;

use jsonwebtoken::Algorithm;
use serde::Deserialize;
use thiserror::Error;

/// Prefix for environment variable overrides (`DOCENGINE__DATABASE__URL`).
pub const ENV_PREFIX: &str = "DOCENGINE";

/// Placeholder secret that must be replaced outside of tests.
pub const DEFAULT_JWT_SECRET: &str = "change-me";

/// Deployment environment the service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    /// Production deployment.
    Production,
    /// Local development.
    Development,
    /// Automated tests.
    Test,
}

impl Environment {
    /// Returns the string representation of the environment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        }
    }

    /// Parses an environment name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "development" => Some(Self::Development),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    /// Returns true for environments where developer shortcuts are allowed.
    #[must_use]
    pub const fn allows_dev_routes(&self) -> bool {
        !matches!(self, Self::Production)
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
            .ok_or_else(|| format!("must be production, development, or test, got `{value}`"))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Human readable service name.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Deployment environment.
    pub environment: Environment,
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    #[serde(default)]
    pub jwt: JwtSettings,
}

fn default_app_name() -> String {
    "DocEngine".to_string()
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings as read from configuration sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    #[serde(default = "default_jwt_secret")]
    pub secret: String,
    /// Signing algorithm name (HS256, HS384 or HS512).
    #[serde(default = "default_jwt_algorithm")]
    pub algorithm: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: default_jwt_secret(),
            algorithm: default_jwt_algorithm(),
            access_token_expire_minutes: default_access_token_expire_minutes(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_expire_minutes() -> i64 {
    60
}

impl JwtSettings {
    /// Resolves the configured algorithm name.
    ///
    /// Only HMAC algorithms are accepted since tokens are signed with a shared secret.
    pub fn signing_algorithm(&self) -> Option<Algorithm> {
        match self.algorithm.trim().to_uppercase().as_str() {
            "HS256" => Some(Algorithm::HS256),
            "HS384" => Some(Algorithm::HS384),
            "HS512" => Some(Algorithm::HS512),
            _ => None,
        }
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// A configuration source could not be read or deserialized.
    #[error("Configuration error. {0}")]
    Source(#[from] config::ConfigError),

    /// Required settings are missing or hold invalid values.
    #[error("Configuration error. {}", describe_problems(.missing, .invalid))]
    Invalid {
        /// Environment variable names of missing settings.
        missing: Vec<String>,
        /// Environment variable names of invalid settings, with a reason.
        invalid: Vec<String>,
    },
}

fn describe_problems(missing: &[String], invalid: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("Missing: {}", missing.join(", ")));
    }
    if !invalid.is_empty() {
        parts.push(format!("Invalid: {}", invalid.join(", ")));
    }
    parts.join("; ")
}

fn env_name(path: &str) -> String {
    format!("{ENV_PREFIX}__{}", path.replace('.', "__").to_uppercase())
}

impl AppConfig {
    /// Loads configuration from config files and environment, then validates it.
    ///
    /// Sources, later ones overriding earlier ones:
    /// - `config/default.toml`
    /// - `config/{RUN_MODE}.toml`
    /// - `DOCENGINE__*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> Result<Self, ConfigLoadError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Checks environment-dependent requirements.
    ///
    /// Tests only need a database URL. Development and production must also
    /// provide a real JWT secret and a service name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoadError::Invalid` listing every offending variable.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        if self.database.url.trim().is_empty() {
            missing.push(env_name("database.url"));
        }

        if self.environment != Environment::Test {
            if self.app_name.trim().is_empty() {
                missing.push(env_name("app_name"));
            }
            let secret = self.jwt.secret.trim();
            if secret.is_empty() || secret == DEFAULT_JWT_SECRET {
                missing.push(env_name("jwt.secret"));
            }
        }

        if self.jwt.signing_algorithm().is_none() {
            invalid.push(format!(
                "{} (must be HS256, HS384 or HS512)",
                env_name("jwt.algorithm")
            ));
        }
        if self.jwt.access_token_expire_minutes <= 0 {
            invalid.push(format!(
                "{} (must be positive)",
                env_name("jwt.access_token_expire_minutes")
            ));
        }

        if missing.is_empty() && invalid.is_empty() {
            Ok(())
        } else {
            Err(ConfigLoadError::Invalid { missing, invalid })
        }
    }

    /// Returns the socket address string the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
