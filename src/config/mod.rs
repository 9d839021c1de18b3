pub mod settings;

pub use settings::{AppConfig, CalendarSettings, DistanceUnit, GeoSettings};
