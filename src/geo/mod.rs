pub mod distance;
pub mod proximity;

pub use distance::GeoDistance;
pub use proximity::{ProximityIndex, TieredNeighbors};
