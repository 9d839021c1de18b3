pub mod clubs;
pub mod connection;
pub mod events;
pub mod models;
pub mod results;
pub mod series;
pub mod setup;
pub mod snapshot;
pub mod store;

pub use connection::{create_pool, get_connection, AccessMode, DbConn, DbPool};
pub use models::*;
