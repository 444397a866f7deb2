//! HTTP surface: the cron trigger and the display page.

use std::num::NonZeroU16;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use sea_orm::DatabaseConnection;
use tokio::sync::{Mutex, RwLock};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::daily::{DailyOutcome, DayWindow, run_daily_generation};
use crate::error::DailyArtError;
use crate::generation::ImageGenerator;
use crate::prompts::PromptGenerator;

mod cron;
mod middleware;
mod prelude;
mod scheduler;
mod views;

use cron::generate_art_handler;
use views::{CachedArt, root_handler};

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    cron_secret: Arc<str>,
    db: DatabaseConnection,
    generator: Arc<dyn ImageGenerator>,
    prompts: Arc<Mutex<PromptGenerator>>,
    display_cache: Arc<RwLock<Option<CachedArt>>>,
}

impl AppState {
    fn new(
        cron_secret: &str,
        generator: Arc<dyn ImageGenerator>,
        prompts: PromptGenerator,
        db: DatabaseConnection,
    ) -> Self {
        Self {
            cron_secret: Arc::from(cron_secret),
            db,
            generator,
            prompts: Arc::new(Mutex::new(prompts)),
            display_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Runs the daily job for the current local day, dropping the display
    /// cache when a new record is created.
    pub(crate) async fn run_daily(&self) -> Result<DailyOutcome, DailyArtError> {
        let outcome = run_daily_generation(
            &self.db,
            self.generator.as_ref(),
            &self.prompts,
            DayWindow::local_now(),
        )
        .await?;
        if matches!(outcome, DailyOutcome::Generated(_)) {
            self.display_cache.write().await.take();
        }
        Ok(outcome)
    }
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(root_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
        .route(
            "/api/cron/generate-art",
            axum::routing::get(generate_art_handler),
        )
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Starts the HTTP server, and the in-process daily schedule if asked to.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    cron_secret: &str,
    generator: Arc<dyn ImageGenerator>,
    prompts: PromptGenerator,
    db: DatabaseConnection,
    internal_schedule: bool,
) -> Result<(), anyhow::Error> {
    let state = AppState::new(cron_secret, generator, prompts, db);
    if internal_schedule {
        scheduler::spawn_daily_schedule(state.clone());
    }
    let app = create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }
    Ok(())
}
