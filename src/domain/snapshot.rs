use std::collections::HashMap;

use super::directory::ClubDirectory;
use super::models::{Club, Event, EventId};
use crate::errors::EngineResult;

/// Immutable view of clubs and events that a classification query runs against
#[derive(Debug, Clone)]
pub struct Snapshot {
    directory: ClubDirectory,
    events: Vec<Event>,
    event_index: HashMap<EventId, usize>,
}

impl Snapshot {
    pub fn new(clubs: Vec<Club>, events: Vec<Event>) -> EngineResult<Self> {
        let directory = ClubDirectory::new(clubs)?;

        for event in &events {
            directory.get(event.club_id)?;
        }

        let event_index = events
            .iter()
            .enumerate()
            .map(|(idx, event)| (event.id, idx))
            .collect();

        Ok(Self {
            directory,
            events,
            event_index,
        })
    }

    pub fn directory(&self) -> &ClubDirectory {
        &self.directory
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.event_index.get(&id).map(|idx| &self.events[*idx])
    }

    pub fn club(&self, id: i64) -> EngineResult<&Club> {
        self.directory.get(id)
    }

    pub fn organizer(&self, event: &Event) -> EngineResult<&Club> {
        self.directory.get(event.club_id)
    }
}
