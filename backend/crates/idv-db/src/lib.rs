pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::create_pool;
pub use error::{DbError, Result};
pub use repositories::identity_repository::IdentityRepository;
pub use repositories::store_outcome::StoreOutcome;
