use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, AppState};
use crate::api::models::ColourParams;

pub async fn get_event_colour(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    Query(params): Query<ColourParams>,
) -> impl IntoResponse {
    match state.calendar().event_colour(event_id, params.club_id) {
        Ok(Some(colours)) => Json(colours).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("Unknown event {}", event_id)).into_response(),
        Err(e) => error_response(e),
    }
}
