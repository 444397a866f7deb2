pub(crate) use crate::error::DailyArtError;
pub(crate) use crate::web::AppState;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use axum::extract::State;
pub(crate) use axum::http::HeaderValue;
pub(crate) use axum::response::{IntoResponse, Response};
pub(crate) use tracing::{debug, error};
