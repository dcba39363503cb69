// handlers/protected - endpoints that always sit behind `jwt_auth_middleware`

pub mod auth;

pub use auth::*;
