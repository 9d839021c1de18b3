use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{
    clubs::{get_club_calendar, get_club_feed, get_participant_counts, get_significant_events},
    events::get_event_colour,
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/clubs/:id/feed", get(get_club_feed))
        .route("/api/clubs/:id/significant", get(get_significant_events))
        .route("/api/clubs/:id/participant_counts", get(get_participant_counts))
        .route("/api/clubs/:id/events.ics", get(get_club_calendar))
        .route("/api/events/:id/colour", get(get_event_colour))
        .with_state(state)
}
