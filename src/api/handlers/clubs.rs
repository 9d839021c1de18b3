use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use std::sync::Arc;

use super::{error_response, AppState};
use crate::api::models::FeedParams;
use crate::services::calendar::FeedWindow;

pub async fn get_club_feed(
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<i64>,
    Query(params): Query<FeedParams>,
) -> impl IntoResponse {
    let window = FeedWindow {
        start: params.start,
        end: params.end,
    };

    match state.calendar().feed(club_id, params.prefix_club_acronym, window) {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_significant_events(
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<i64>,
) -> impl IntoResponse {
    match state.calendar().significant_events(club_id) {
        Ok(events) => Json(events).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_participant_counts(
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<i64>,
) -> impl IntoResponse {
    match state.calendar().participant_counts(club_id) {
        Ok(counts) => Json(counts).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_club_calendar(
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<i64>,
) -> impl IntoResponse {
    match state.calendar().club_ics(club_id, Utc::now()) {
        Ok(ics) => ([(header::CONTENT_TYPE, "text/calendar; charset=utf-8")], ics).into_response(),
        Err(e) => error_response(e),
    }
}
