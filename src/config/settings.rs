use log::warn;

const EARTH_RADIUS_KM: f64 = 6371.0;
const EARTH_RADIUS_MI: f64 = 3956.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceUnit {
    Kilometers,
    Miles,
}

impl DistanceUnit {
    pub fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
            DistanceUnit::Miles => EARTH_RADIUS_MI,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "km" | "kilometers" | "kilometres" => Some(DistanceUnit::Kilometers),
            "mi" | "miles" => Some(DistanceUnit::Miles),
            _ => None,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeoSettings {
    pub unit: DistanceUnit,
    pub radius: f64,
}

impl GeoSettings {
    pub fn with_unit(unit: DistanceUnit) -> Self {
        Self {
            unit,
            radius: unit.earth_radius(),
        }
    }
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self::with_unit(DistanceUnit::Kilometers)
    }
}

#[derive(Debug, Clone)]
pub struct CalendarSettings {
    pub site_base_url: String,
    pub ics_event_limit: usize,
    pub title_distance_threshold: f64,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            site_base_url: "https://whyjustrun.ca".to_string(),
            ics_event_limit: 50,
            title_distance_threshold: 100.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub geo: GeoSettings,
    pub calendar: CalendarSettings,
    pub database_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            geo: GeoSettings::default(),
            calendar: CalendarSettings::default(),
            database_path: "club_calendar.db".to_string(),
        }
    }

    /// Defaults overridden by `DATABASE_PATH`, `DISTANCE_UNIT` and `SITE_BASE_URL`
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.database_path = path;
        }

        if let Ok(unit) = std::env::var("DISTANCE_UNIT") {
            match DistanceUnit::parse(&unit) {
                Some(unit) => config.geo = GeoSettings::with_unit(unit),
                None => warn!("Ignoring unknown DISTANCE_UNIT {:?}, using km", unit),
            }
        }

        if let Ok(url) = std::env::var("SITE_BASE_URL") {
            config.calendar.site_base_url = url.trim_end_matches('/').to_string();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parsing() {
        assert_eq!(DistanceUnit::parse("km"), Some(DistanceUnit::Kilometers));
        assert_eq!(DistanceUnit::parse(" Miles "), Some(DistanceUnit::Miles));
        assert_eq!(DistanceUnit::parse("furlongs"), None);
    }

    #[test]
    fn test_radius_follows_unit() {
        assert_eq!(GeoSettings::default().radius, 6371.0);
        assert_eq!(GeoSettings::with_unit(DistanceUnit::Miles).radius, 3956.0);
    }
}
