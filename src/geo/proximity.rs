use std::collections::HashSet;

use log::debug;

use super::distance::{require_club_coordinate, GeoDistance};
use crate::domain::classification::{LOCAL_DISTANCE, NATIONAL_DISTANCE, REGIONAL_DISTANCE};
use crate::domain::{Classification, Club, ClubDirectory, ClubId};
use crate::errors::EngineResult;

/// Answers "which clubs lie within R of this club" over a club directory.
///
/// Nothing is cached: every call walks the full club set.
pub struct ProximityIndex<'a> {
    directory: &'a ClubDirectory,
    geo: GeoDistance,
}

/// Neighbour sets for the three geographically bounded tiers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TieredNeighbors {
    pub local: HashSet<ClubId>,
    pub regional: HashSet<ClubId>,
    pub national: HashSet<ClubId>,
}

impl TieredNeighbors {
    pub fn for_tier(&self, tier: Classification) -> Option<&HashSet<ClubId>> {
        match tier {
            Classification::Local => Some(&self.local),
            Classification::Regional => Some(&self.regional),
            Classification::National => Some(&self.national),
            Classification::Club | Classification::International => None,
        }
    }
}

impl<'a> ProximityIndex<'a> {
    pub fn new(directory: &'a ClubDirectory, geo: GeoDistance) -> Self {
        Self { directory, geo }
    }

    /// Clubs other than `club` within `radius` (inclusive). Clubs without a
    /// coordinate are never neighbours.
    pub fn neighbors_within(&self, club: &Club, radius: f64) -> EngineResult<HashSet<ClubId>> {
        let origin = require_club_coordinate(club)?;

        let neighbors: HashSet<ClubId> = self
            .others(club)
            .filter_map(|other| other.coordinate.map(|c| (other.id, self.geo.between(origin, c))))
            .filter(|(_, distance)| *distance <= radius)
            .map(|(id, _)| id)
            .collect();

        debug!(
            "Club {} has {} neighbours within {}",
            club.id,
            neighbors.len(),
            radius
        );
        Ok(neighbors)
    }

    /// Local, regional and national neighbour sets from a single pass
    pub fn tiered_neighbors(&self, club: &Club) -> EngineResult<TieredNeighbors> {
        let origin = require_club_coordinate(club)?;
        let mut tiers = TieredNeighbors::default();

        for other in self.others(club) {
            let Some(coordinate) = other.coordinate else {
                continue;
            };
            let distance = self.geo.between(origin, coordinate);
            if distance <= LOCAL_DISTANCE {
                tiers.local.insert(other.id);
            }
            if distance <= REGIONAL_DISTANCE {
                tiers.regional.insert(other.id);
            }
            if distance <= NATIONAL_DISTANCE {
                tiers.national.insert(other.id);
            }
        }

        Ok(tiers)
    }

    fn others<'c>(&'c self, club: &'c Club) -> impl Iterator<Item = &'a Club> + 'c {
        self.directory.clubs().filter(move |other| other.id != club.id)
    }
}
