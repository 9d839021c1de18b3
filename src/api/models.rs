use serde::{Deserialize, Serialize};

use crate::significance::SignificanceReason;
use crate::visual::{ClassificationSummary, ClubSummary};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificantEvent {
    pub id: i64,
    pub name: String,
    pub start: i64,
    pub club: ClubSummary,
    pub event_classification: ClassificationSummary,
    pub reasons: Vec<SignificanceReason>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantCount {
    pub event_id: i64,
    pub name: String,
    pub club: ClubSummary,
    pub count: i64,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventColours {
    pub event_id: i64,
    pub color: String,
    pub text_color: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedParams {
    /// Unix seconds; events finishing before this are left out
    pub start: Option<i64>,
    /// Unix seconds; events starting after this are left out
    pub end: Option<i64>,
    #[serde(default)]
    pub prefix_club_acronym: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColourParams {
    pub club_id: Option<i64>,
}
