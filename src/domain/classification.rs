use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};

// Thresholds (in km) for distances to events. Events at clubs within the
// given distance are shown on a club's calendar.
pub const LOCAL_DISTANCE: f64 = 300.0;
pub const REGIONAL_DISTANCE: f64 = 1000.0;
pub const NATIONAL_DISTANCE: f64 = 2000.0;

/// Event classification tier, ordered by geographic scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Club,
    Local,
    Regional,
    National,
    International,
}

impl Classification {
    pub const ALL: [Classification; 5] = [
        Classification::Club,
        Classification::Local,
        Classification::Regional,
        Classification::National,
        Classification::International,
    ];

    /// Position in ascending scope order, `Club` is 0
    pub fn rank(self) -> u8 {
        match self {
            Classification::Club => 0,
            Classification::Local => 1,
            Classification::Regional => 2,
            Classification::National => 3,
            Classification::International => 4,
        }
    }

    /// Distance threshold for tiers that are bounded geographically
    pub fn threshold(self) -> Option<f64> {
        match self {
            Classification::Local => Some(LOCAL_DISTANCE),
            Classification::Regional => Some(REGIONAL_DISTANCE),
            Classification::National => Some(NATIONAL_DISTANCE),
            Classification::Club | Classification::International => None,
        }
    }

    /// Identifier used by storage and the feed payload
    pub fn id(self) -> i32 {
        match self {
            Classification::International => 1,
            Classification::National => 2,
            Classification::Regional => 3,
            Classification::Local => 4,
            Classification::Club => 5,
        }
    }

    /// Whether a club's own event of this tier is meant for a wider audience.
    /// Storage ids count down from `Club`, so every other tier sits below it.
    pub fn beyond_club(self) -> bool {
        self.id() < Classification::Club.id()
    }

    pub fn from_id(id: i32) -> EngineResult<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.id() == id)
            .ok_or(EngineError::UnknownClassificationTier(id))
    }

    pub fn name(self) -> &'static str {
        match self {
            Classification::Club => "Club",
            Classification::Local => "Local",
            Classification::Regional => "Regional",
            Classification::National => "National",
            Classification::International => "International",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_follows_scope_order() {
        let ranks: Vec<u8> = Classification::ALL.iter().map(|t| t.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_only_club_tier_stays_within_club() {
        let beyond: Vec<Classification> = Classification::ALL
            .into_iter()
            .filter(|tier| tier.beyond_club())
            .collect();
        assert_eq!(
            beyond,
            vec![
                Classification::Local,
                Classification::Regional,
                Classification::National,
                Classification::International
            ]
        );
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(Classification::Club.threshold(), None);
        assert_eq!(Classification::Local.threshold(), Some(300.0));
        assert_eq!(Classification::Regional.threshold(), Some(1000.0));
        assert_eq!(Classification::National.threshold(), Some(2000.0));
        assert_eq!(Classification::International.threshold(), None);
    }

    #[test]
    fn test_from_id() {
        for tier in Classification::ALL {
            assert_eq!(Classification::from_id(tier.id()), Ok(tier));
        }
        assert_eq!(
            Classification::from_id(0),
            Err(EngineError::UnknownClassificationTier(0))
        );
        assert_eq!(
            Classification::from_id(6),
            Err(EngineError::UnknownClassificationTier(6))
        );
    }
}
