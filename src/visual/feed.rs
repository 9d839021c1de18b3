use serde::Serialize;

/// Calendar feed entry as consumed by the shared calendar widget
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub id: i64,
    pub title: String,
    pub start: i64,
    pub end: i64,
    pub event_classification: ClassificationSummary,
    pub all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    pub club: ClubSummary,
    pub color: String,
    pub text_color: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubSummary {
    pub id: i64,
    pub acronym: String,
}
