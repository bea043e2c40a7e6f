//! Configuration management

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_PASSWORD_SCHEME, DEFAULT_SESSION_TTL_SECONDS, ENV_PREFIX,
};
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub password: PasswordSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionSettings {
    /// Lifetime of a session row and Max-Age of its cookie.
    pub ttl_seconds: i64,
    /// Reject profile reads whose path id differs from the session owner.
    pub enforce_ownership: bool,
    pub secure_cookie: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PasswordSettings {
    /// `argon2` or `sha512`
    pub scheme: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            env: "development".into(),
            host: "127.0.0.1".into(),
            port: 8080,
            name: "isupipe".into(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_seconds: 3,
            run_migrations: true,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            enforce_ownership: false,
            secure_cookie: false,
        }
    }
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_PASSWORD_SCHEME.into(),
        }
    }
}

/// Only `ISUPIPE__SECTION__KEY` variables are read; bare names such as
/// `PASSWORD` or `SESSION` never reach the settings tree.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl AppConfig {
    /// Defaults, then `config/default`, then `config/{APP_ENV}`, then
    /// `ISUPIPE__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::load_with(environment())
    }

    fn load_with(environment: Environment) -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(environment)
            .build()?;
        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.session.ttl_seconds <= 0 {
            return Err(AppError::InvalidSetting {
                key: "session.ttl_seconds",
                reason: format!("must be positive, got {}", self.session.ttl_seconds),
            });
        }
        if self.database.max_connections == 0 {
            return Err(AppError::InvalidSetting {
                key: "database.max_connections",
                reason: "must be at least 1".into(),
            });
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::InvalidSetting {
                key: "database.min_connections",
                reason: format!(
                    "{} exceeds max_connections {}",
                    self.database.min_connections, self.database.max_connections
                ),
            });
        }
        Ok(())
    }
}
