use crate::config::GeoSettings;
use crate::domain::{Club, Coordinate, Event};
use crate::errors::{EngineError, EngineResult};

/// Great-circle distance on a sphere of the configured radius.
///
/// The result is in whatever unit the radius is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoDistance {
    radius: f64,
}

impl GeoDistance {
    pub fn new(settings: &GeoSettings) -> Self {
        Self::with_radius(settings.radius)
    }

    pub fn with_radius(radius: f64) -> Self {
        Self { radius }
    }

    /// Haversine distance between two points given in degrees
    pub fn between(&self, a: Coordinate, b: Coordinate) -> f64 {
        let d_lat = (b.lat - a.lat).to_radians();
        let d_lng = (b.lng - a.lng).to_radians();
        let h = (d_lat / 2.0).sin().powi(2)
            + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * self.radius * h.sqrt().asin()
    }

    pub fn distance(&self, a: Option<Coordinate>, b: Option<Coordinate>) -> EngineResult<f64> {
        let a = a.ok_or_else(|| EngineError::MissingCoordinate("first point".to_string()))?;
        let b = b.ok_or_else(|| EngineError::MissingCoordinate("second point".to_string()))?;
        Ok(self.between(a, b))
    }

    /// Distance from an event to a club. Events without their own
    /// coordinate are placed at their organizing club.
    pub fn event_distance(
        &self,
        event: &Event,
        organizer: &Club,
        club: &Club,
    ) -> EngineResult<f64> {
        let origin = match event.coordinate {
            Some(coordinate) => coordinate,
            None => require_club_coordinate(organizer)?,
        };
        let target = require_club_coordinate(club)?;
        Ok(self.between(origin, target))
    }
}

pub(crate) fn require_club_coordinate(club: &Club) -> EngineResult<Coordinate> {
    club.coordinate
        .ok_or_else(|| EngineError::MissingCoordinate(format!("club {}", club.id)))
}
