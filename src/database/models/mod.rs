pub mod satellite;
pub mod user;

pub use satellite::{Satellite, SatelliteCreate, SatelliteUpdate};
pub use user::{User, UserRead};
