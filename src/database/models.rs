use chrono::{DateTime, Utc};

use crate::domain::{Classification, Club, Coordinate, Event, Series};
use crate::errors::EngineResult;

#[derive(Debug, Clone)]
pub struct ClubRow {
    pub id: i64,
    pub name: String,
    pub acronym: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub parent_id: Option<i64>,
    pub timezone: String,
    pub site_url: Option<String>,
}

impl ClubRow {
    pub fn into_club(self) -> Club {
        Club {
            id: self.id,
            name: self.name,
            acronym: self.acronym,
            coordinate: Coordinate::from_parts(self.lat, self.lng),
            parent_id: self.parent_id,
            timezone: self.timezone,
            site_url: self.site_url,
        }
    }
}

/// Event joined with its series
#[derive(Debug, Clone)]
pub struct EventRow {
    pub id: i64,
    pub name: String,
    pub club_id: i64,
    pub event_classification_id: i32,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub date: DateTime<Utc>,
    pub finish_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub number_of_participants: Option<i64>,
    pub series_id: Option<i64>,
    pub series_name: Option<String>,
    pub series_color: Option<String>,
}

impl EventRow {
    pub fn into_event(self) -> EngineResult<Event> {
        let classification = Classification::from_id(self.event_classification_id)?;
        let series = match (self.series_id, self.series_name, self.series_color) {
            (Some(id), Some(name), Some(color)) => Some(Series { id, name, color }),
            _ => None,
        };

        Ok(Event {
            id: self.id,
            name: self.name,
            club_id: self.club_id,
            coordinate: Coordinate::from_parts(self.lat, self.lng),
            classification,
            start: self.date,
            finish: self.finish_date,
            series,
            description: self.description,
            participant_count: self.number_of_participants,
        })
    }
}
