//! Generate a single image through the configured provider, to check the
//! API key and settings before the daily job relies on them.
//!
//! Minimal UX:
//!   generate_test_image
//!   generate_test_image "a lighthouse at dawn, watercolor"

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dailyart::constants::{DEFAULT_IMAGE_MODEL, DEFAULT_OPENAI_BASE_URL};
use dailyart::generation::{ImageGenerator, OpenAiImageClient};

const GALLERY_PROMPT: &str = "A beautiful, ethereal digital art gallery with floating artworks in a minimalist space, soft ambient lighting, modern architecture, clean white walls, AI-generated paintings displayed elegantly, futuristic and serene atmosphere, high quality, professional photography style";

#[derive(Parser, Debug)]
#[command(name = "generate_test_image")]
#[command(about = "Generate one test image via the images API and print its URL")]
struct Args {
    /// Prompt to render, defaults to a gallery scene
    prompt: Option<String>,

    /// OpenAI API key
    #[arg(required = true, long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// Images API base URL
    #[arg(long, default_value = DEFAULT_OPENAI_BASE_URL, env = "DAILYART_OPENAI_BASE_URL")]
    openai_base_url: String,

    /// Image model
    #[arg(long, default_value = DEFAULT_IMAGE_MODEL)]
    image_model: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let prompt = args.prompt.as_deref().unwrap_or(GALLERY_PROMPT);

    let client = OpenAiImageClient::new(
        &args.openai_base_url,
        &args.openai_api_key,
        &args.image_model,
        Duration::from_secs(args.timeout_secs),
    )
    .context("Failed to set up image client")?;

    eprintln!("Prompt: {prompt}");
    let image = client
        .generate(prompt)
        .await
        .context("Image generation failed")?;

    println!("Image URL: {}", image.image_url);
    eprintln!("Revised prompt: {}", image.revised_prompt);
    Ok(())
}
