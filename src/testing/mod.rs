use crate::config::{AppConfig, SeedUser};
use crate::state::AppState;

pub const TEST_SECRET: &str = "unit-test-signing-secret";
pub const TEST_USERNAME: &str = "pgrogan1";
pub const TEST_PASSWORD: &str = "hello";

/// In-memory configuration with the default account seeded
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::for_testing(TEST_SECRET);
    config.seed = Some(SeedUser {
        username: TEST_USERNAME.to_string(),
        password: TEST_PASSWORD.to_string(),
    });
    config
}

/// Fully initialized state over a private in-memory database
pub async fn test_state() -> AppState {
    AppState::initialize(test_config())
        .await
        .expect("failed to initialize test state")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn states_do_not_share_storage() {
        let a = test_state().await;
        let b = test_state().await;

        sqlx::query("INSERT INTO satellites (acronym, mass, power) VALUES ('A', 1.0, 2.0)")
            .execute(a.db.pool())
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM satellites")
            .fetch_one(b.db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn initialize_rejects_missing_secret() {
        let mut config = test_config();
        config.security.jwt_secret.clear();
        assert!(AppState::initialize(config).await.is_err());
    }

    #[tokio::test]
    async fn initialize_rejects_out_of_range_expiry() {
        for minutes in [0, 99_999_999_999_999] {
            let mut config = test_config();
            config.security.token_expiry_minutes = minutes;
            let err = AppState::initialize(config).await.err().unwrap();
            assert!(matches!(
                err,
                crate::state::StartupError::Config(crate::config::ConfigError::InvalidTokenExpiry(_))
            ));
        }
    }
}
