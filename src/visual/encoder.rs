use super::colour::{text_colour, ColourSource, BLACK, WHITE};
use super::feed::{ClassificationSummary, ClubSummary, FeedEntry};
use crate::config::{CalendarSettings, GeoSettings};
use crate::domain::{Club, ClubDirectory, Event};
use crate::errors::EngineResult;
use crate::geo::GeoDistance;

/// Derives display colours and feed entries for events as seen from a
/// viewing club.
pub struct VisualEncoder<'a> {
    directory: &'a ClubDirectory,
    geo: GeoDistance,
    unit_suffix: &'static str,
    calendar: &'a CalendarSettings,
}

impl<'a> VisualEncoder<'a> {
    pub fn new(
        directory: &'a ClubDirectory,
        geo: &GeoSettings,
        calendar: &'a CalendarSettings,
    ) -> Self {
        Self {
            directory,
            geo: GeoDistance::new(geo),
            unit_suffix: geo.unit.suffix(),
            calendar,
        }
    }

    pub fn colour_source(
        &self,
        event: &Event,
        viewing_club: Option<&Club>,
    ) -> EngineResult<ColourSource> {
        match viewing_club {
            Some(club) if club.id != event.club_id => {
                let organizer = self.directory.get(event.club_id)?;
                let distance = self.geo.event_distance(event, organizer, club)?;
                Ok(ColourSource::Gradient(distance))
            }
            _ => Ok(ColourSource::Fixed(series_colour(event))),
        }
    }

    pub fn display_colour(
        &self,
        event: &Event,
        viewing_club: Option<&Club>,
    ) -> EngineResult<String> {
        self.colour_source(event, viewing_club).map(|source| source.resolve())
    }

    pub fn project_to_feed_entry(
        &self,
        event: &Event,
        viewing_club: Option<&Club>,
        prefix_acronym: bool,
    ) -> EngineResult<FeedEntry> {
        let organizer = self.directory.get(event.club_id)?;

        let mut title = if prefix_acronym {
            format!("{} - {}", organizer.acronym, event.name)
        } else {
            event.name.clone()
        };

        let organizes = viewing_club.is_some_and(|club| club.id == organizer.id);
        let (color, text_color) = if organizes {
            let color = self.display_colour(event, viewing_club)?;
            let text = text_colour(&color)?.to_string();
            (color, text)
        } else {
            // Away events keep a white background and carry distance in the text
            (WHITE.to_string(), self.display_colour(event, viewing_club)?)
        };

        if let Some(club) = viewing_club {
            let distance = self.geo.event_distance(event, organizer, club)?;
            if distance > self.calendar.title_distance_threshold {
                title.push_str(&format!(" ({}{})", round_to_ten(distance), self.unit_suffix));
            }
        }

        Ok(FeedEntry {
            id: event.id,
            title,
            start: event.start.timestamp(),
            end: event.finish_date().timestamp(),
            event_classification: ClassificationSummary {
                id: event.classification.id(),
                name: event.classification.name().to_string(),
            },
            all_day: false,
            lat: event.coordinate.map(|c| c.lat),
            lng: event.coordinate.map(|c| c.lng),
            club: ClubSummary {
                id: organizer.id,
                acronym: organizer.acronym.clone(),
            },
            color,
            text_color,
            url: event.url(organizer, &self.calendar.site_base_url),
        })
    }
}

fn series_colour(event: &Event) -> String {
    event
        .series
        .as_ref()
        .map(|series| series.color.clone())
        .unwrap_or_else(|| BLACK.to_string())
}

fn round_to_ten(distance: f64) -> i64 {
    ((distance / 10.0).round() * 10.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, Coordinate, Series};
    use crate::errors::EngineError;
    use chrono::{TimeZone, Utc};

    fn club(id: i64, coordinate: Option<Coordinate>) -> Club {
        Club {
            id,
            name: format!("Club {id}"),
            acronym: format!("C{id}"),
            coordinate,
            parent_id: None,
            timezone: "UTC".to_string(),
            site_url: None,
        }
    }

    fn directory() -> ClubDirectory {
        ClubDirectory::new(vec![
            club(1, Some(Coordinate::new(0.0, 0.0))),
            club(2, Some(Coordinate::new(0.0, 10.0))),
            club(3, Some(Coordinate::new(0.0, 0.3))),
            club(4, None),
        ])
        .unwrap()
    }

    fn event(series: Option<Series>) -> Event {
        Event {
            id: 7,
            name: "Night Sprint".to_string(),
            club_id: 1,
            coordinate: None,
            classification: Classification::Regional,
            start: Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap(),
            finish: Some(Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()),
            series,
            description: None,
            participant_count: None,
        }
    }

    fn blue_series() -> Series {
        Series {
            id: 1,
            name: "Summer Series".to_string(),
            color: "#3366FF".to_string(),
        }
    }

    #[test]
    fn test_display_colour_for_organizer_uses_series() {
        let directory = directory();
        let calendar = CalendarSettings::default();
        let encoder = VisualEncoder::new(&directory, &GeoSettings::default(), &calendar);
        let organizer = directory.get(1).unwrap();

        let own = encoder.display_colour(&event(Some(blue_series())), Some(organizer));
        assert_eq!(own.unwrap(), "#3366FF");
        assert_eq!(encoder.display_colour(&event(None), Some(organizer)).unwrap(), "#000000");
        assert_eq!(encoder.display_colour(&event(Some(blue_series())), None).unwrap(), "#3366FF");
    }

    #[test]
    fn test_display_colour_by_distance() {
        let directory = directory();
        let calendar = CalendarSettings::default();
        let encoder = VisualEncoder::new(&directory, &GeoSettings::default(), &calendar);

        // ~33 km away
        let near = directory.get(3).unwrap();
        let nearby = encoder.display_colour(&event(Some(blue_series())), Some(near));
        assert_eq!(nearby.unwrap(), "#000000");

        // ~1112 km away: 0xAA * (1111.95 - 50) / 1950 = 92.6
        let far = directory.get(2).unwrap();
        assert_eq!(
            encoder.colour_source(&event(None), Some(far)).unwrap(),
            ColourSource::Gradient(GeoDistance::with_radius(6371.0).between(
                Coordinate::new(0.0, 0.0),
                Coordinate::new(0.0, 10.0)
            ))
        );
        assert_eq!(encoder.display_colour(&event(None), Some(far)).unwrap(), "#5D5D5D");
    }

    #[test]
    fn test_display_colour_needs_viewer_location() {
        let directory = directory();
        let calendar = CalendarSettings::default();
        let encoder = VisualEncoder::new(&directory, &GeoSettings::default(), &calendar);
        let virtual_club = directory.get(4).unwrap();

        assert_eq!(
            encoder.display_colour(&event(None), Some(virtual_club)),
            Err(EngineError::MissingCoordinate("club 4".to_string()))
        );
    }

    #[test]
    fn test_feed_entry_for_organizer() {
        let directory = directory();
        let calendar = CalendarSettings::default();
        let encoder = VisualEncoder::new(&directory, &GeoSettings::default(), &calendar);
        let organizer = directory.get(1).unwrap();

        let entry = encoder
            .project_to_feed_entry(&event(Some(blue_series())), Some(organizer), true)
            .unwrap();

        assert_eq!(entry.title, "C1 - Night Sprint");
        assert_eq!(entry.color, "#3366FF");
        assert_eq!(entry.text_color, "#FFFFFF");
        assert_eq!(entry.start, 1717264800);
        assert_eq!(entry.end, 1717272000);
        assert_eq!(entry.event_classification.id, 3);
        assert_eq!(entry.event_classification.name, "Regional");
        assert!(!entry.all_day);
        assert_eq!(entry.lat, None);
        assert_eq!(entry.url, "https://whyjustrun.ca/events/view/7");
    }

    #[test]
    fn test_feed_entry_for_distant_viewer() {
        let directory = directory();
        let calendar = CalendarSettings::default();
        let encoder = VisualEncoder::new(&directory, &GeoSettings::default(), &calendar);
        let far = directory.get(2).unwrap();

        let entry = encoder
            .project_to_feed_entry(&event(Some(blue_series())), Some(far), false)
            .unwrap();

        assert_eq!(entry.title, "Night Sprint (1110km)");
        assert_eq!(entry.color, "#FFFFFF");
        assert_eq!(entry.text_color, "#5D5D5D");
        assert_eq!(entry.club.acronym, "C1");
    }

    #[test]
    fn test_feed_entry_nearby_viewer_has_no_distance_suffix() {
        let directory = directory();
        let calendar = CalendarSettings::default();
        let encoder = VisualEncoder::new(&directory, &GeoSettings::default(), &calendar);
        let near = directory.get(3).unwrap();

        let mut geotagged = event(None);
        geotagged.coordinate = Some(Coordinate::new(0.0, 0.2));
        let entry = encoder.project_to_feed_entry(&geotagged, Some(near), false).unwrap();

        assert_eq!(entry.title, "Night Sprint");
        assert_eq!(entry.lat, Some(0.0));
        assert_eq!(entry.lng, Some(0.2));
    }

    #[test]
    fn test_feed_entry_serializes_camel_case() {
        let directory = directory();
        let calendar = CalendarSettings::default();
        let encoder = VisualEncoder::new(&directory, &GeoSettings::default(), &calendar);

        let entry = encoder.project_to_feed_entry(&event(None), None, false).unwrap();
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["textColor"], "#000000");
        assert_eq!(json["color"], "#FFFFFF");
        assert_eq!(json["allDay"], false);
        assert_eq!(json["eventClassification"]["name"], "Regional");
        assert!(json.get("lat").is_none());
    }

    #[test]
    fn test_round_to_ten() {
        assert_eq!(round_to_ten(104.9), 100);
        assert_eq!(round_to_ten(105.0), 110);
        assert_eq!(round_to_ten(1111.95), 1110);
    }
}
