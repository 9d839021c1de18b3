use chrono::{DateTime, Utc};
use serde::Serialize;

use super::sanitize::strip_tags;
use crate::config::CalendarSettings;
use crate::domain::{ClubDirectory, Coordinate, Event};
use crate::errors::EngineResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryClass {
    Public,
}

impl EntryClass {
    pub fn as_str(&self) -> &str {
        match self {
            EntryClass::Public => "PUBLIC",
        }
    }
}

/// Event reshaped for calendar file output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub uid: String,
    pub url: String,
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub geo: Option<Coordinate>,
    pub location: Option<String>,
    pub class: EntryClass,
}

pub struct CalendarProjection<'a> {
    directory: &'a ClubDirectory,
    calendar: &'a CalendarSettings,
}

impl<'a> CalendarProjection<'a> {
    pub fn new(directory: &'a ClubDirectory, calendar: &'a CalendarSettings) -> Self {
        Self { directory, calendar }
    }

    pub fn to_calendar_entry(&self, event: &Event) -> EngineResult<CalendarEntry> {
        let organizer = self.directory.get(event.club_id)?;
        let url = event.url(organizer, &self.calendar.site_base_url);

        Ok(CalendarEntry {
            uid: url.clone(),
            url,
            summary: event.name.clone(),
            description: event.description.as_deref().map(strip_tags).unwrap_or_default(),
            start: event.start,
            end: event.finish_date(),
            geo: event.coordinate,
            location: event
                .coordinate
                .map(|c| format!("{},{}", round4(c.lat), round4(c.lng))),
            class: EntryClass::Public,
        })
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, Club};
    use chrono::TimeZone;

    fn directory() -> ClubDirectory {
        ClubDirectory::new(vec![Club {
            id: 3,
            name: "Gatineau Valley Orienteering Club".to_string(),
            acronym: "GVOC".to_string(),
            coordinate: Some(Coordinate::new(45.48, -75.7)),
            parent_id: None,
            timezone: "America/Toronto".to_string(),
            site_url: Some("https://gvoc.whyjustrun.ca".to_string()),
        }])
        .unwrap()
    }

    fn event() -> Event {
        Event {
            id: 42,
            name: "Gatineau Park Middle".to_string(),
            club_id: 3,
            coordinate: Some(Coordinate::new(45.512345, -75.861234)),
            classification: Classification::Local,
            start: Utc.with_ymd_and_hms(2024, 9, 14, 13, 0, 0).unwrap(),
            finish: None,
            series: None,
            description: Some("<p>Start at <b>P17</b></p>".to_string()),
            participant_count: None,
        }
    }

    #[test]
    fn test_calendar_entry() {
        let directory = directory();
        let settings = CalendarSettings::default();
        let projection = CalendarProjection::new(&directory, &settings);

        let entry = projection.to_calendar_entry(&event()).unwrap();

        assert_eq!(entry.uid, "https://gvoc.whyjustrun.ca/events/view/42");
        assert_eq!(entry.url, entry.uid);
        assert_eq!(entry.summary, "Gatineau Park Middle");
        assert_eq!(entry.description, "Start at P17");
        assert_eq!(entry.end, Utc.with_ymd_and_hms(2024, 9, 14, 14, 0, 0).unwrap());
        assert_eq!(entry.location.as_deref(), Some("45.5123,-75.8612"));
        assert_eq!(entry.class.as_str(), "PUBLIC");
    }

    #[test]
    fn test_calendar_entry_without_location() {
        let directory = directory();
        let settings = CalendarSettings::default();
        let projection = CalendarProjection::new(&directory, &settings);
        let mut event = event();
        event.coordinate = None;
        event.description = None;

        let entry = projection.to_calendar_entry(&event).unwrap();

        assert_eq!(entry.geo, None);
        assert_eq!(entry.location, None);
        assert_eq!(entry.description, "");
    }
}
