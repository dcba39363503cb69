use axum::Json;

use crate::database::models::UserRead;
use crate::middleware::AuthUser;

/// GET /users/me/ - Identity behind the presented bearer token
///
/// ```json
/// { "username": "pgrogan1" }
/// ```
pub async fn whoami(user: AuthUser) -> Json<UserRead> {
    Json(UserRead { username: user.username })
}
