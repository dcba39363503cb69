pub mod extract;
pub mod validate;

pub use extract::{FormBody, JsonBody, PathParam};
pub use validate::Validate;
