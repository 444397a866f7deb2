//! Error handling

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::{error, info};

use crate::constants::ERROR_GENERATION_FAILED;
use crate::generation::GenerationError;

/// definitions for the dailyart application.
#[derive(Debug)]
pub enum DailyArtError {
    /// Missing or wrong cron credential
    Unauthorized,
    /// The image provider call failed or returned nothing usable
    Generation(GenerationError),
    /// When DB operations fail
    DatabaseError(sea_orm::DbErr),
}

impl std::fmt::Display for DailyArtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::Generation(err) => write!(f, "Generation failed: {err}"),
            Self::DatabaseError(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for DailyArtError {}

impl From<sea_orm::DbErr> for DailyArtError {
    fn from(err: sea_orm::DbErr) -> Self {
        DailyArtError::DatabaseError(err)
    }
}

impl From<GenerationError> for DailyArtError {
    fn from(err: GenerationError) -> Self {
        DailyArtError::Generation(err)
    }
}

impl IntoResponse for DailyArtError {
    fn into_response(self) -> axum::response::Response {
        match self {
            DailyArtError::Unauthorized => {
                info!("Unauthorized cron request received");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Unauthorized" })),
                )
                    .into_response()
            }
            other => {
                error!("Error generating artwork: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": ERROR_GENERATION_FAILED })),
                )
                    .into_response()
            }
        }
    }
}
