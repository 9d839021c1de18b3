use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::classification::Classification;

pub type ClubId = i64;
pub type EventId = i64;

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate only when both halves are present
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }
}

/// Club data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub acronym: String,
    pub coordinate: Option<Coordinate>,
    pub parent_id: Option<ClubId>,
    pub timezone: String,
    pub site_url: Option<String>,
}

impl Club {
    /// Absolute link on the club's own site, or on the shared site
    pub fn clubsite_url(&self, path: &str, default_base: &str) -> String {
        let base = self.site_url.as_deref().unwrap_or(default_base);
        format!("{}{}", base.trim_end_matches('/'), path)
    }
}

/// Event series, carries the colour used on the organizing club's calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// Event data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub club_id: ClubId,
    pub coordinate: Option<Coordinate>,
    pub classification: Classification,
    pub start: DateTime<Utc>,
    pub finish: Option<DateTime<Utc>>,
    pub series: Option<Series>,
    pub description: Option<String>,
    pub participant_count: Option<i64>,
}

impl Event {
    pub fn has_location(&self) -> bool {
        self.coordinate.is_some()
    }

    /// Finish instant, one hour after the start when not recorded
    pub fn finish_date(&self) -> DateTime<Utc> {
        self.finish.unwrap_or_else(|| self.start + Duration::hours(1))
    }

    /// Canonical link to the event page on the organizer's site
    pub fn url(&self, organizer: &Club, default_base: &str) -> String {
        organizer.clubsite_url(&format!("/events/view/{}", self.id), default_base)
    }

    /// Participant count, cached value first, else derived from results
    pub fn number_of_participants(&self, results: &[ResultStatus]) -> i64 {
        self.participant_count
            .unwrap_or_else(|| count_participants(results))
    }
}

/// Outcome of a single competitor on a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Ok,
    DidNotStart,
    DidNotFinish,
    MissingPunch,
    Disqualified,
    #[serde(other)]
    Other,
}

impl ResultStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "ok" => ResultStatus::Ok,
            "did_not_start" => ResultStatus::DidNotStart,
            "did_not_finish" => ResultStatus::DidNotFinish,
            "missing_punch" => ResultStatus::MissingPunch,
            "disqualified" => ResultStatus::Disqualified,
            _ => ResultStatus::Other,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResultStatus::Ok => "ok",
            ResultStatus::DidNotStart => "did_not_start",
            ResultStatus::DidNotFinish => "did_not_finish",
            ResultStatus::MissingPunch => "missing_punch",
            ResultStatus::Disqualified => "disqualified",
            ResultStatus::Other => "other",
        }
    }
}

/// Everyone who started counts as a participant
pub fn count_participants(results: &[ResultStatus]) -> i64 {
    results
        .iter()
        .filter(|status| **status != ResultStatus::DidNotStart)
        .count() as i64
}
