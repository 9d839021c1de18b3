use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::{Classification, Club, Coordinate, Event, ResultStatus, Series, Snapshot};
use crate::errors::EngineResult;

/// Raw club/event export, as handed over by club administration tooling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default)]
    pub clubs: Vec<ClubRecord>,
    #[serde(default)]
    pub series: Vec<SeriesRecord>,
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
    #[serde(default)]
    pub results: Vec<ResultRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubRecord {
    pub id: i64,
    pub name: String,
    pub acronym: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub parent_id: Option<i64>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub name: String,
    pub club_id: i64,
    pub series_id: Option<i64>,
    pub event_classification_id: i32,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub date: DateTime<Utc>,
    pub finish_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub number_of_participants: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: i64,
    pub course_id: i64,
    pub status: ResultStatus,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl RecordSet {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read records file {}", path.display()))?;

        let records: RecordSet = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                path,
                json.chars().take(200).collect::<String>()
            )
        })?;

        info!(
            "Loaded {} clubs, {} events, {} results from {}",
            records.clubs.len(),
            records.events.len(),
            records.results.len(),
            path.display()
        );
        Ok(records)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize records")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Engine view of the records. Fails on the same inconsistencies the
    /// engine would reject: unknown tiers, dangling club references, cycles.
    pub fn to_snapshot(&self) -> EngineResult<Snapshot> {
        let clubs = self.clubs.iter().map(ClubRecord::to_club).collect();
        let series: HashMap<i64, &SeriesRecord> = self.series.iter().map(|s| (s.id, s)).collect();

        let events = self
            .events
            .iter()
            .map(|event| event.to_event(&series))
            .collect::<EngineResult<Vec<_>>>()?;

        Snapshot::new(clubs, events)
    }
}

impl ClubRecord {
    pub fn to_club(&self) -> Club {
        Club {
            id: self.id,
            name: self.name.clone(),
            acronym: self.acronym.clone(),
            coordinate: Coordinate::from_parts(self.lat, self.lng),
            parent_id: self.parent_id,
            timezone: self.timezone.clone(),
            site_url: self.site_url.clone(),
        }
    }
}

impl EventRecord {
    fn to_event(&self, series: &HashMap<i64, &SeriesRecord>) -> EngineResult<Event> {
        Ok(Event {
            id: self.id,
            name: self.name.clone(),
            club_id: self.club_id,
            coordinate: Coordinate::from_parts(self.lat, self.lng),
            classification: Classification::from_id(self.event_classification_id)?,
            start: self.date,
            finish: self.finish_date,
            series: self
                .series_id
                .and_then(|id| series.get(&id))
                .map(|s| Series {
                    id: s.id,
                    name: s.name.clone(),
                    color: s.color.clone(),
                }),
            description: self.description.clone(),
            participant_count: self.number_of_participants,
        })
    }
}

/// Two national federations around Ottawa, shared by storage and service tests
#[cfg(test)]
pub(crate) fn sample_records() -> RecordSet {
    fn club(
        id: i64,
        acronym: &str,
        parent_id: Option<i64>,
        coordinate: Option<(f64, f64)>,
    ) -> ClubRecord {
        ClubRecord {
            id,
            name: format!("{acronym} Orienteering"),
            acronym: acronym.to_string(),
            lat: coordinate.map(|c| c.0),
            lng: coordinate.map(|c| c.1),
            parent_id,
            timezone: "America/Toronto".to_string(),
            site_url: None,
        }
    }

    fn event(
        id: i64,
        name: &str,
        club_id: i64,
        tier: i32,
        date: &str,
        coordinate: Option<(f64, f64)>,
    ) -> EventRecord {
        EventRecord {
            id,
            name: name.to_string(),
            club_id,
            series_id: None,
            event_classification_id: tier,
            lat: coordinate.map(|c| c.0),
            lng: coordinate.map(|c| c.1),
            date: date.parse().unwrap(),
            finish_date: None,
            description: None,
            number_of_participants: None,
        }
    }

    let mut series_event = event(10, "Summer Series #1", 2, 4, "2024-06-05T22:00:00Z", None);
    series_event.series_id = Some(1);

    let mut world_cup = event(16, "World Cup", 6, 1, "2024-09-01T12:00:00Z", None);
    world_cup.number_of_participants = Some(250);

    let mut training = event(17, "Club Training", 2, 5, "2024-05-01T22:00:00Z", None);
    training.finish_date = Some("2024-05-02T00:30:00Z".parse().unwrap());
    training.description = Some("<p>Meet at the <b>north</b> parking lot</p>".to_string());

    RecordSet {
        clubs: vec![
            club(1, "OC", None, None),
            club(2, "OOC", Some(1), Some((45.4215, -75.6972))),
            club(3, "TOC", Some(1), Some((43.6532, -79.3832))),
            club(4, "GVOC", Some(1), Some((49.2827, -123.1207))),
            club(5, "OUSA", None, None),
            club(6, "ADK", Some(5), Some((44.2795, -73.9799))),
            club(7, "QOC", Some(5), Some((38.9072, -77.0369))),
        ],
        series: vec![SeriesRecord {
            id: 1,
            name: "Ottawa Summer Series".to_string(),
            color: "#3366FF".to_string(),
        }],
        events: vec![
            series_event,
            event(11, "Adirondack Local", 6, 4, "2024-06-08T14:00:00Z", Some((44.28, -73.98))),
            event(12, "Toronto Local", 3, 4, "2024-06-09T14:00:00Z", None),
            event(13, "QOC Regional", 7, 3, "2024-07-01T14:00:00Z", None),
            event(
                14,
                "Canadian Championships",
                4,
                2,
                "2024-08-10T16:00:00Z",
                Some((50.1163, -122.9574)),
            ),
            event(15, "US Championships", 7, 2, "2024-08-17T16:00:00Z", Some((35.0, -106.6))),
            world_cup,
            training,
        ],
        courses: vec![
            CourseRecord { id: 1, event_id: 10, name: "Long".to_string() },
            CourseRecord { id: 2, event_id: 10, name: "Short".to_string() },
        ],
        results: vec![
            ResultRecord { id: 1, course_id: 1, status: ResultStatus::Ok },
            ResultRecord { id: 2, course_id: 1, status: ResultStatus::Ok },
            ResultRecord { id: 3, course_id: 1, status: ResultStatus::DidNotStart },
            ResultRecord { id: 4, course_id: 2, status: ResultStatus::MissingPunch },
        ],
    }
}
