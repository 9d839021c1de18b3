use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::api::models::{EventColours, ParticipantCount, SignificantEvent};
use crate::calendar::{write_calendar, CalendarProjection};
use crate::config::AppConfig;
use crate::database::snapshot::{load_recent_club_events, load_snapshot};
use crate::database::{self, clubs, events, DbPool};
use crate::domain::{ClubId, Event, EventId, Snapshot};
use crate::errors::{EngineError, EngineResult};
use crate::geo::GeoDistance;
use crate::significance::SignificanceClassifier;
use crate::visual::{text_colour, ClassificationSummary, ClubSummary, FeedEntry, VisualEncoder};

/// Inclusive time range in unix seconds; open ends are unbounded
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedWindow {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl FeedWindow {
    pub fn overlaps(&self, event: &Event) -> bool {
        let after_start = self.start.is_none_or(|start| event.finish_date().timestamp() >= start);
        let before_end = self.end.is_none_or(|end| event.start.timestamp() <= end);
        after_start && before_end
    }
}

/// Per-club calendar queries over the imported snapshot
pub struct CalendarService<'a> {
    pool: &'a DbPool,
    config: &'a AppConfig,
}

impl<'a> CalendarService<'a> {
    pub fn new(pool: &'a DbPool, config: &'a AppConfig) -> Self {
        Self { pool, config }
    }

    pub fn significant_events(&self, club_id: ClubId) -> Result<Vec<SignificantEvent>> {
        let snapshot = self.snapshot()?;
        let club = snapshot.club(club_id)?;
        let classifier = self.classifier(&snapshot);

        let events = classifier
            .significant_events(club, snapshot.events())?
            .into_iter()
            .map(|event| {
                let organizer = snapshot.organizer(event)?;
                Ok(SignificantEvent {
                    id: event.id,
                    name: event.name.clone(),
                    start: event.start.timestamp(),
                    club: ClubSummary {
                        id: organizer.id,
                        acronym: organizer.acronym.clone(),
                    },
                    event_classification: ClassificationSummary {
                        id: event.classification.id(),
                        name: event.classification.name().to_string(),
                    },
                    reasons: classifier.reasons(club, event)?,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(events)
    }

    /// Feed entries for everything on the club's calendar within `window`
    pub fn feed(
        &self,
        club_id: ClubId,
        prefix_acronym: bool,
        window: FeedWindow,
    ) -> Result<Vec<FeedEntry>> {
        let snapshot = self.snapshot()?;
        let club = snapshot.club(club_id)?;
        let classifier = self.classifier(&snapshot);
        let encoder = self.encoder(&snapshot);

        let mut entries = Vec::new();
        for event in classifier.calendar_events(club, snapshot.events())? {
            if !window.overlaps(event) {
                continue;
            }

            let entry = match encoder.project_to_feed_entry(event, Some(club), prefix_acronym) {
                Err(EngineError::MissingCoordinate(what)) => {
                    warn!(
                        "No distance from club {} to event {} ({}), showing it without one",
                        club.id, event.id, what
                    );
                    encoder.project_to_feed_entry(event, None, prefix_acronym)?
                }
                other => other?,
            };
            entries.push(entry);
        }

        entries.sort_by_key(|entry| (entry.start, entry.id));
        info!("Feed for club {} has {} entries", club.id, entries.len());
        Ok(entries)
    }

    /// Participants of every event organized by the club or any club below it
    pub fn participant_counts(&self, club_id: ClubId) -> Result<Vec<ParticipantCount>> {
        let snapshot = self.snapshot()?;
        let directory = snapshot.directory();
        directory.get(club_id)?;

        let mut members = HashSet::new();
        let mut pending = vec![club_id];
        while let Some(id) = pending.pop() {
            if members.insert(id) {
                pending.extend_from_slice(directory.children(id));
            }
        }

        let mut counts = snapshot
            .events()
            .iter()
            .filter(|event| members.contains(&event.club_id))
            .map(|event| {
                let organizer = snapshot.organizer(event)?;
                Ok(ParticipantCount {
                    event_id: event.id,
                    name: event.name.clone(),
                    club: ClubSummary {
                        id: organizer.id,
                        acronym: organizer.acronym.clone(),
                    },
                    count: event.participant_count.unwrap_or(0),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        counts.sort_by_key(|count| count.event_id);
        info!(
            "Counted participants for {} events under club {} ({} clubs)",
            counts.len(),
            club_id,
            members.len()
        );
        Ok(counts)
    }

    /// iCalendar document with the club's most recent events
    pub fn club_ics(&self, club_id: ClubId, stamp: DateTime<Utc>) -> Result<String> {
        let conn = database::get_connection(self.pool)?;
        let club = clubs::find_by_id(&conn, club_id)?
            .ok_or(EngineError::UnknownClub(club_id))?
            .into_club();
        let snapshot = load_snapshot(&conn)?;

        let events = load_recent_club_events(&conn, club_id, self.config.calendar.ics_event_limit)?;
        let projection = CalendarProjection::new(snapshot.directory(), &self.config.calendar);
        let entries = events
            .iter()
            .map(|event| projection.to_calendar_entry(event))
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(write_calendar(&club.name, &entries, stamp))
    }

    /// Background and text colour of one event, optionally as seen by a club.
    /// `None` when the event does not exist.
    pub fn event_colour(
        &self,
        event_id: EventId,
        club_id: Option<ClubId>,
    ) -> Result<Option<EventColours>> {
        let conn = database::get_connection(self.pool)?;
        let Some(row) = events::find_by_id(&conn, event_id)? else {
            return Ok(None);
        };
        let event = row.into_event()?;

        let snapshot = load_snapshot(&conn)?;
        let viewing_club = club_id.map(|id| snapshot.club(id)).transpose()?;

        let encoder = self.encoder(&snapshot);
        let color = encoder.display_colour(&event, viewing_club)?;
        let text_color = text_colour(&color)?.to_string();

        Ok(Some(EventColours {
            event_id,
            color,
            text_color,
        }))
    }

    fn snapshot(&self) -> Result<Snapshot> {
        let conn = database::get_connection(self.pool)?;
        load_snapshot(&conn)
    }

    fn encoder<'s>(&'s self, snapshot: &'s Snapshot) -> VisualEncoder<'s> {
        VisualEncoder::new(snapshot.directory(), &self.config.geo, &self.config.calendar)
    }

    fn classifier<'s>(&self, snapshot: &'s Snapshot) -> SignificanceClassifier<'s> {
        SignificanceClassifier::new(snapshot.directory(), GeoDistance::new(&self.config.geo))
    }
}
