pub mod credentials;
pub mod password;
pub mod token;

pub use credentials::{authenticate, find_user, seed_default_user, CredentialError};
pub use token::{Claims, TokenError, TokenIssuer};
