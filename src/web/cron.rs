use axum::Json;
use serde::Serialize;

use super::middleware::CronAuth;
use super::prelude::*;
use crate::db::entities::art;

#[derive(Debug, Serialize)]
pub(crate) struct GenerateArtResponse {
    message: &'static str,
    art: art::Model,
}

/// handles GET /api/cron/generate-art
pub(crate) async fn generate_art_handler(
    _auth: CronAuth,
    State(state): State<AppState>,
) -> Result<Json<GenerateArtResponse>, DailyArtError> {
    let outcome = state.run_daily().await?;
    debug!("Cron run finished: {}", outcome.message());
    Ok(Json(GenerateArtResponse {
        message: outcome.message(),
        art: outcome.art().clone(),
    }))
}
