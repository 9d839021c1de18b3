pub mod classifier;

pub use classifier::{SignificanceClassifier, SignificanceReason};
