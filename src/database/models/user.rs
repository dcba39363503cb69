use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the users table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

/// Identity returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRead {
    pub username: String,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self { username: user.username }
    }
}
