use std::time::{Duration, Instant, SystemTime};

use axum::http::header::{CACHE_CONTROL, LAST_MODIFIED};
use chrono::{DateTime, Local, Utc};
use httpdate::fmt_http_date;

use super::prelude::*;
use crate::constants::{DISPLAY_CACHE_CONTROL, DISPLAY_REVALIDATE_SECONDS};
use crate::daily::DayWindow;
use crate::db::entities::art;

/// The last record the display page read, and when.
#[derive(Clone, Debug)]
pub(crate) struct CachedArt {
    fetched_at: Instant,
    day_start: DateTime<Utc>,
    art: Option<art::Model>,
}

impl CachedArt {
    fn is_fresh(&self, day_start: DateTime<Utc>) -> bool {
        self.day_start == day_start
            && self.fetched_at.elapsed() < Duration::from_secs(DISPLAY_REVALIDATE_SECONDS)
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate {
    pub(crate) has_art: bool,
    pub(crate) image_url: String,
    pub(crate) prompt: String,
    pub(crate) formatted_date: String,
}

impl HomeTemplate {
    fn empty() -> Self {
        Self {
            has_art: false,
            image_url: String::new(),
            prompt: String::new(),
            formatted_date: String::new(),
        }
    }

    fn for_art(art: &art::Model) -> Self {
        Self {
            has_art: true,
            image_url: art.image_url.clone(),
            prompt: art.prompt.clone(),
            formatted_date: format_date(&art.created_at),
        }
    }
}

fn format_date(created_at: &DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format("%A, %B %-d, %Y")
        .to_string()
}

/// Today's active record, served from the cache while it is fresh.
async fn todays_art(state: &AppState) -> Option<art::Model> {
    let window = DayWindow::local_now();
    if let Some(cached) = state.display_cache.read().await.as_ref()
        && cached.is_fresh(window.start)
    {
        return cached.art.clone();
    }

    match art::find_active_since(&state.db, window.start).await {
        Ok(found) => {
            *state.display_cache.write().await = Some(CachedArt {
                fetched_at: Instant::now(),
                day_start: window.start,
                art: found.clone(),
            });
            found
        }
        Err(err) => {
            error!("Error fetching artwork: {}", err);
            None
        }
    }
}

/// handles the / GET
pub(crate) async fn root_handler(State(state): State<AppState>) -> Response {
    let art = todays_art(&state).await;
    let template = match art.as_ref() {
        Some(art) => HomeTemplate::for_art(art),
        None => HomeTemplate::empty(),
    };

    let mut response = template.into_response();
    let headers = response.headers_mut();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static(DISPLAY_CACHE_CONTROL.as_str()),
    );
    if let Some(art) = art
        && let Ok(value) = HeaderValue::from_str(&fmt_http_date(SystemTime::from(art.created_at)))
    {
        headers.insert(LAST_MODIFIED, value);
    }
    response
}
