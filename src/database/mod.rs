pub mod manager;
pub mod models;
pub mod repository;
pub mod session;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::SatelliteRepository;
pub use session::DbSession;
