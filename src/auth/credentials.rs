use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;

use crate::auth::password::{hash_password_blocking, verify_dummy_blocking, verify_password_blocking, PasswordError};
use crate::database::manager::DatabaseError;
use crate::database::models::{User, UserRead};

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<sqlx::Error> for CredentialError {
    fn from(err: sqlx::Error) -> Self {
        CredentialError::Database(err.into())
    }
}

/// Look up a user row by username
pub async fn find_user(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT username, hashed_password FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

/// Check a username/password pair.
///
/// Returns `None` both for an unknown username and for a wrong password.
/// An unknown username still runs a full hash verification, so the two
/// cases also take the same time.
pub async fn authenticate(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<Option<UserRead>, CredentialError> {
    let Some(user) = find_user(conn, username).await? else {
        verify_dummy_blocking(password.to_string()).await?;
        tracing::debug!("Login rejected: unknown user");
        return Ok(None);
    };

    let verified = verify_password_blocking(password.to_string(), user.hashed_password.clone()).await?;
    if !verified {
        tracing::debug!("Login rejected: password mismatch for '{}'", user.username);
        return Ok(None);
    }

    Ok(Some(user.into()))
}

/// Insert the startup account unless a user with that name already exists.
///
/// Returns whether a row was created.
pub async fn seed_default_user(pool: &SqlitePool, username: &str, password: &str) -> Result<bool, CredentialError> {
    let mut conn = pool.acquire().await?;
    if find_user(&mut conn, username).await?.is_some() {
        return Ok(false);
    }

    let hashed_password = hash_password_blocking(password.to_string()).await?;

    // OR IGNORE keeps seeding idempotent if another process raced us here
    let result = sqlx::query("INSERT OR IGNORE INTO users (username, hashed_password) VALUES (?, ?)")
        .bind(username)
        .bind(&hashed_password)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() == 1)
}
