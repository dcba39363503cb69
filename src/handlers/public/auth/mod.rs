// handlers/public/auth - token acquisition, no authentication required

pub mod login; // POST /token - authenticate and get a bearer token

pub use login::token_post;
