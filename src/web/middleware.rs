use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::prelude::*;

/// Proof that the request carried the scheduler's bearer secret.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CronAuth;

fn is_authorized(header: Option<&str>, secret: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == secret)
}

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = DailyArtError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let authorized = is_authorized(header, &state.cron_secret);

        async move {
            if authorized {
                Ok(Self)
            } else {
                debug!("Rejected cron request without a valid bearer secret");
                Err(DailyArtError::Unauthorized)
            }
        }
    }
}
