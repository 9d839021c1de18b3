pub mod classification;
mod directory;
pub mod models;
mod snapshot;

pub use classification::Classification;
pub use directory::ClubDirectory;
pub use models::*;
pub use snapshot::Snapshot;
