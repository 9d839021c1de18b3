use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;

use crate::config::AppConfig;
use crate::database::DbPool;
use crate::errors::EngineError;
use crate::services::calendar::CalendarService;

pub mod clubs;
pub mod events;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

impl AppState {
    pub fn calendar(&self) -> CalendarService<'_> {
        CalendarService::new(&self.pool, &self.config)
    }
}

/// Maps service failures onto HTTP statuses
pub fn error_response(err: anyhow::Error) -> Response {
    match err.downcast_ref::<EngineError>() {
        Some(EngineError::UnknownClub(id)) => {
            (StatusCode::NOT_FOUND, format!("Unknown club {}", id)).into_response()
        }
        _ => {
            error!("Request failed: {:#}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", err)).into_response()
        }
    }
}
