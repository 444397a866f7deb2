//! The once-a-day generation job.
//!
//! A run is: look for a record created since local midnight, and if there is
//! none build a prompt, ask the provider for an image and store it as the only
//! active record. Storing re-checks for a record inside the same transaction
//! that clears the old active flags, so two overlapping runs cannot both commit.
//! Both can still call the provider; the loser's image is dropped.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::constants::{MESSAGE_ALREADY_GENERATED, MESSAGE_GENERATED};
use crate::db::entities::art::{self, NewArt, RotateOutcome};
use crate::error::DailyArtError;
use crate::generation::ImageGenerator;
use crate::prompts::PromptGenerator;

/// The current instant and the start of its day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayWindow {
    /// Local midnight, as UTC
    pub start: DateTime<Utc>,
    /// The moment of the run
    pub now: DateTime<Utc>,
}

impl DayWindow {
    /// Window for `now` in its own time zone.
    pub fn for_time<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            start: start_of_day(now),
            now: now.with_timezone(&Utc),
        }
    }

    /// Window for the current wall clock in the server's local zone.
    pub fn local_now() -> Self {
        Self::for_time(&Local::now())
    }
}

/// What a run ended with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DailyOutcome {
    /// A new record was created and activated
    Generated(art::Model),
    /// Today's record already existed and was left alone
    AlreadyGenerated(art::Model),
}

impl DailyOutcome {
    /// Human readable summary for the API response
    pub fn message(&self) -> &'static str {
        match self {
            Self::Generated(_) => MESSAGE_GENERATED,
            Self::AlreadyGenerated(_) => MESSAGE_ALREADY_GENERATED,
        }
    }

    /// The record the run produced or found
    pub fn art(&self) -> &art::Model {
        match self {
            Self::Generated(art) | Self::AlreadyGenerated(art) => art,
        }
    }
}

/// Earliest instant of `date` in `tz`, as UTC. When midnight falls into a
/// DST gap the first valid hour after it is used.
pub fn start_of_date<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=3)
        .filter_map(|hour| {
            tz.from_local_datetime(&(midnight + chrono::Duration::hours(hour)))
                .earliest()
        })
        .next()
        .map(|start| start.with_timezone(&Utc))
}

/// Start of the day containing `now`, in `now`'s time zone.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    start_of_date(&now.timezone(), now.date_naive()).unwrap_or_else(|| now.with_timezone(&Utc))
}

/// How long to sleep from `now` until the next day starts.
pub fn until_next_day<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let next = now
        .date_naive()
        .succ_opt()
        .and_then(|tomorrow| start_of_date(&now.timezone(), tomorrow));
    match next {
        Some(next) => (next - now.with_timezone(&Utc))
            .to_std()
            .unwrap_or(Duration::ZERO),
        None => Duration::from_secs(24 * 60 * 60),
    }
}

/// Runs the job once for `window`.
pub async fn run_daily_generation(
    db: &DatabaseConnection,
    generator: &dyn ImageGenerator,
    prompts: &Mutex<PromptGenerator>,
    window: DayWindow,
) -> Result<DailyOutcome, DailyArtError> {
    if let Some(existing) = art::find_created_since(db, window.start).await? {
        info!("Art {} already generated for today", existing.id);
        return Ok(DailyOutcome::AlreadyGenerated(existing));
    }

    let prompt = prompts.lock().await.next_prompt().text();
    info!("Generating artwork for prompt: {prompt}");

    let image = generator.generate(&prompt).await?;

    let new = NewArt {
        image_url: image.image_url,
        prompt,
        revised_prompt: image.revised_prompt,
    };
    match art::rotate_active(db, window.start, new, window.now).await? {
        RotateOutcome::Created(created) => {
            info!("Stored new artwork {}: {}", created.id, created.image_url);
            Ok(DailyOutcome::Generated(created))
        }
        RotateOutcome::Existing(existing) => {
            warn!(
                "Art {} was stored by a concurrent run, discarding the image just generated",
                existing.id
            );
            Ok(DailyOutcome::AlreadyGenerated(existing))
        }
    }
}
