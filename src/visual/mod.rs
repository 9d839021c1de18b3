pub mod colour;
mod encoder;
pub mod feed;

pub use colour::{text_colour, ColourSource};
pub use encoder::VisualEncoder;
pub use feed::{ClassificationSummary, ClubSummary, FeedEntry};
