//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;

use crate::constants::{DEFAULT_IMAGE_MODEL, DEFAULT_OPENAI_BASE_URL};

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "DAILYART_DEBUG")]
    /// Enable debug logging. Env: DAILYART_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "9000", env = "DAILYART_PORT")]
    /// http listener, defaults to `9000`.
    /// Env: DAILYART_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "DAILYART_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: DAILYART_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(
        long,
        short,
        default_value = "dailyart.sqlite",
        env = "DAILYART_DATABASE_PATH"
    )]
    /// Path to the database file, eg `/data/dailyart.sqlite`.
    /// Env: DAILYART_DATABASE_PATH
    pub database_path: String,

    #[clap(long, env = "CRON_SECRET", hide_env_values = true)]
    /// Shared secret the scheduler sends as `Authorization: Bearer <secret>`.
    /// Env: CRON_SECRET
    pub cron_secret: String,

    #[clap(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    /// OpenAI API key. Env: OPENAI_API_KEY
    pub openai_api_key: String,

    #[clap(long, default_value = DEFAULT_OPENAI_BASE_URL, env = "DAILYART_OPENAI_BASE_URL")]
    /// Base URL of the images API. Env: DAILYART_OPENAI_BASE_URL
    pub openai_base_url: String,

    #[clap(long, default_value = DEFAULT_IMAGE_MODEL, env = "DAILYART_IMAGE_MODEL")]
    /// Image model. Env: DAILYART_IMAGE_MODEL
    pub image_model: String,

    #[clap(long, default_value = "120", env = "DAILYART_GENERATION_TIMEOUT_SECS")]
    /// Upper bound on a single generation request, in seconds.
    /// Env: DAILYART_GENERATION_TIMEOUT_SECS
    pub generation_timeout_secs: u64,

    #[clap(long, env = "DAILYART_PROMPT_SEED")]
    /// Fixed seed for prompt selection, random when unset.
    /// Env: DAILYART_PROMPT_SEED
    pub prompt_seed: Option<u64>,

    #[clap(long, env = "DAILYART_INTERNAL_SCHEDULE")]
    /// Also run the daily job in-process at local midnight.
    /// Env: DAILYART_INTERNAL_SCHEDULE
    pub internal_schedule: bool,
}
