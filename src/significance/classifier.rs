use std::collections::HashSet;

use log::{debug, info};
use serde::Serialize;

use crate::domain::{Classification, Club, ClubDirectory, ClubId, Event};
use crate::errors::EngineResult;
use crate::geo::{GeoDistance, ProximityIndex};

/// Which rule made an event significant to a club
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignificanceReason {
    /// Organized by the club at any tier wider than club-only
    ClubOwned,
    /// No own coordinate, organizer is within the tier radius
    Ungeotagged,
    /// Event (or its organizer) lies within the tier radius
    Geotagged,
    /// International, or national within the same national hierarchy
    Overarching,
}

impl SignificanceReason {
    pub fn as_str(&self) -> &str {
        match self {
            SignificanceReason::ClubOwned => "club_owned",
            SignificanceReason::Ungeotagged => "ungeotagged",
            SignificanceReason::Geotagged => "geotagged",
            SignificanceReason::Overarching => "overarching",
        }
    }
}

/// Decides whether an event should surface on a club's calendar.
pub struct SignificanceClassifier<'a> {
    directory: &'a ClubDirectory,
    geo: GeoDistance,
}

impl<'a> SignificanceClassifier<'a> {
    pub fn new(directory: &'a ClubDirectory, geo: GeoDistance) -> Self {
        Self { directory, geo }
    }

    pub fn is_significant(&self, club: &Club, event: &Event) -> EngineResult<bool> {
        Ok(!self.reasons(club, event)?.is_empty())
    }

    /// Every rule that holds for the pair, empty when the event is not significant
    pub fn reasons(&self, club: &Club, event: &Event) -> EngineResult<Vec<SignificanceReason>> {
        let organizer = self.directory.get(event.club_id)?;
        let neighbors = self.fresh_neighbors(club, event);
        Ok(self.collect_reasons(club, event, organizer, neighbors.as_ref()))
    }

    /// Significant events out of `events`. Neighbour sets are computed once
    /// for the whole batch.
    pub fn significant_events<'e>(
        &self,
        club: &Club,
        events: &'e [Event],
    ) -> EngineResult<Vec<&'e Event>> {
        let tiers = match ProximityIndex::new(self.directory, self.geo).tiered_neighbors(club) {
            Ok(tiers) => Some(tiers),
            Err(e) => {
                debug!("No neighbour sets for club {}: {}", club.id, e);
                None
            }
        };

        let mut significant = Vec::new();
        for event in events {
            let organizer = self.directory.get(event.club_id)?;
            let neighbors = tiers.as_ref().and_then(|t| t.for_tier(event.classification));
            if !self.collect_reasons(club, event, organizer, neighbors).is_empty() {
                significant.push(event);
            }
        }

        info!(
            "{} of {} events are significant to club {}",
            significant.len(),
            events.len(),
            club.id
        );
        Ok(significant)
    }

    /// The club's own events plus everything significant to it
    pub fn calendar_events<'e>(
        &self,
        club: &Club,
        events: &'e [Event],
    ) -> EngineResult<Vec<&'e Event>> {
        let significant: HashSet<i64> = self
            .significant_events(club, events)?
            .into_iter()
            .map(|event| event.id)
            .collect();

        Ok(events
            .iter()
            .filter(|event| event.club_id == club.id || significant.contains(&event.id))
            .collect())
    }

    fn fresh_neighbors(&self, club: &Club, event: &Event) -> Option<HashSet<ClubId>> {
        if event.has_location() || event.club_id == club.id {
            return None;
        }
        let threshold = event.classification.threshold()?;

        match ProximityIndex::new(self.directory, self.geo).neighbors_within(club, threshold) {
            Ok(neighbors) => Some(neighbors),
            Err(e) => {
                debug!("Skipping ungeotagged rule for club {}: {}", club.id, e);
                None
            }
        }
    }

    fn collect_reasons(
        &self,
        club: &Club,
        event: &Event,
        organizer: &Club,
        neighbors: Option<&HashSet<ClubId>>,
    ) -> Vec<SignificanceReason> {
        let mut reasons = Vec::new();

        if club_owned(club, event) {
            reasons.push(SignificanceReason::ClubOwned);
        }

        if event.club_id == club.id {
            return reasons;
        }

        if ungeotagged(event, neighbors) {
            reasons.push(SignificanceReason::Ungeotagged);
        }
        if self.geotagged(club, event, organizer) {
            reasons.push(SignificanceReason::Geotagged);
        }
        if self.overarching(club, event) {
            reasons.push(SignificanceReason::Overarching);
        }

        reasons
    }

    fn geotagged(&self, club: &Club, event: &Event, organizer: &Club) -> bool {
        let Some(threshold) = event.classification.threshold() else {
            return false;
        };

        match self.geo.event_distance(event, organizer, club) {
            Ok(distance) => distance <= threshold,
            Err(e) => {
                debug!("Skipping geotagged rule for event {}: {}", event.id, e);
                false
            }
        }
    }

    fn overarching(&self, club: &Club, event: &Event) -> bool {
        match event.classification {
            Classification::International => true,
            Classification::National => self.directory.is_national_peer(club.id, event.club_id),
            _ => false,
        }
    }
}

fn club_owned(club: &Club, event: &Event) -> bool {
    event.club_id == club.id && event.classification.beyond_club()
}

fn ungeotagged(event: &Event, neighbors: Option<&HashSet<ClubId>>) -> bool {
    !event.has_location()
        && event.classification.threshold().is_some()
        && neighbors.is_some_and(|n| n.contains(&event.club_id))
}
