use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::auth::{seed_default_user, CredentialError, TokenError, TokenIssuer};
use crate::config::{AppConfig, ConfigError};
use crate::database::{DatabaseError, DatabaseManager};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database setup failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("token issuer setup failed: {0}")]
    Token(#[from] TokenError),

    #[error("seeding default user failed: {0}")]
    Seed(#[from] CredentialError),
}

/// Shared handles passed to every handler through axum state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseManager,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    /// Open storage, create tables, seed the default account and build the
    /// token issuer.
    pub async fn initialize(config: AppConfig) -> Result<Self, StartupError> {
        config.validate()?;

        let tokens = TokenIssuer::from_config(&config.security)?;

        let db = DatabaseManager::connect(&config.database).await?;
        db.migrate().await?;

        if let Some(seed) = &config.seed {
            if seed_default_user(db.pool(), &seed.username, &seed.password).await? {
                info!("Seeded default user '{}'", seed.username);
            } else {
                info!("Default user '{}' already present", seed.username);
            }
        }

        Ok(Self {
            config: Arc::new(config),
            db,
            tokens: Arc::new(tokens),
        })
    }
}
