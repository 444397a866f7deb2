//! Shared constants/setters for things
//!

use std::sync::LazyLock;

/// Suffix appended to every generated prompt
pub const PROMPT_SUFFIX: &str = "high quality, professional artwork";

/// Default images API location
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default image model
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Square output resolution requested from the provider
pub const IMAGE_SIZE: &str = "1024x1024";

/// High-detail quality tier
pub const IMAGE_QUALITY: &str = "hd";

/// Vivid rendering mode
pub const IMAGE_STYLE: &str = "vivid";

/// How long (in seconds) the display page keeps serving a fetched record.
pub const DISPLAY_REVALIDATE_SECONDS: u64 = 60 * 60;

/// Cache-Control value for the display page.
pub static DISPLAY_CACHE_CONTROL: LazyLock<String> =
    LazyLock::new(|| format!("public, max-age={}", DISPLAY_REVALIDATE_SECONDS));

/// Response message when a new record was created
pub const MESSAGE_GENERATED: &str = "Successfully generated new artwork";

/// Response message when today's record already existed
pub const MESSAGE_ALREADY_GENERATED: &str = "Art already generated for today";

/// Generic error body for failed daily runs
pub const ERROR_GENERATION_FAILED: &str = "Failed to generate artwork";
