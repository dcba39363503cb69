use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SECURITY_JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("SECURITY_TOKEN_EXPIRY_MINUTES must be between 1 and {max}, got {0}", max = MAX_TOKEN_EXPIRY_MINUTES)]
    InvalidTokenExpiry(i64),
}

/// Upper bound on token lifetime: one year
pub const MAX_TOKEN_EXPIRY_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub seed: Option<SeedUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_algorithm: String,
    pub token_expiry_minutes: i64,
    pub protect_satellites: bool,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// Account created at startup when absent from the users table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides();

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        let expiry = self.security.token_expiry_minutes;
        if !(1..=MAX_TOKEN_EXPIRY_MINUTES).contains(&expiry) {
            return Err(ConfigError::InvalidTokenExpiry(expiry));
        }
        Ok(())
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_BUSY_TIMEOUT_MS") {
            self.database.busy_timeout_ms = v.parse().unwrap_or(self.database.busy_timeout_ms);
        }

        // API overrides
        if let Ok(v) = env::var("API_HOST") {
            self.api.host = v;
        }
        if let Some(port) = env::var("API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_ALGORITHM") {
            self.security.jwt_algorithm = v;
        }
        if let Ok(v) = env::var("SECURITY_TOKEN_EXPIRY_MINUTES") {
            self.security.token_expiry_minutes = v.parse().unwrap_or(self.security.token_expiry_minutes);
        }
        if let Ok(v) = env::var("SECURITY_PROTECT_SATELLITES") {
            self.security.protect_satellites = v.parse().unwrap_or(self.security.protect_satellites);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Seed account overrides. Both values are needed to introduce a seed
        // where the preset has none.
        match (env::var("SEED_USERNAME").ok(), env::var("SEED_PASSWORD").ok()) {
            (Some(username), Some(password)) => {
                self.seed = Some(SeedUser { username, password });
            }
            (Some(username), None) => {
                if let Some(seed) = self.seed.as_mut() {
                    seed.username = username;
                }
            }
            (None, Some(password)) => {
                if let Some(seed) = self.seed.as_mut() {
                    seed.password = password;
                }
            }
            (None, None) => {}
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: "sqlite://satellites.db".to_string(),
                max_connections: 5,
                connection_timeout: 30,
                busy_timeout_ms: 5000,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_algorithm: "HS256".to_string(),
                token_expiry_minutes: 30,
                protect_satellites: false,
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
            seed: Some(SeedUser::default_account()),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: "sqlite://satellites.db".to_string(),
                max_connections: 10,
                connection_timeout: 10,
                busy_timeout_ms: 5000,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_algorithm: "HS256".to_string(),
                token_expiry_minutes: 30,
                protect_satellites: false,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            seed: Some(SeedUser::default_account()),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: "sqlite://satellites.db".to_string(),
                max_connections: 10,
                connection_timeout: 5,
                busy_timeout_ms: 10_000,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_algorithm: "HS256".to_string(),
                token_expiry_minutes: 30,
                protect_satellites: false,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            seed: None,
        }
    }

    /// Development preset against a private in-memory database, for tests
    pub fn for_testing(secret: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;
        config.api.enable_request_logging = false;
        config.security.jwt_secret = secret.into();
        config
    }
}

impl SeedUser {
    fn default_account() -> Self {
        Self {
            username: "pgrogan1".to_string(),
            password: "hello".to_string(),
        }
    }
}
