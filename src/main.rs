use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dailyart::config::setup_logging;
use dailyart::generation::OpenAiImageClient;
use dailyart::prompts::PromptGenerator;
use sea_orm_migration::MigratorTrait;
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = dailyart::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    let db = match dailyart::db::connect_db(&cli.database_path).await {
        Ok(db) => db,
        Err(err) => {
            error!("Database connection error: {}", err);
            return;
        }
    };

    if let Err(err) = dailyart::db::migrations::Migrator::up(&db, None).await {
        error!("Database migration error: {}", err);
        return;
    }

    let generator = match OpenAiImageClient::new(
        &cli.openai_base_url,
        &cli.openai_api_key,
        &cli.image_model,
        Duration::from_secs(cli.generation_timeout_secs),
    ) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to set up image client: {}", err);
            return;
        }
    };

    if let Err(err) = dailyart::web::setup_server(
        &cli.listen_address,
        cli.port,
        &cli.cron_secret,
        Arc::new(generator),
        PromptGenerator::new(cli.prompt_seed),
        db,
        cli.internal_schedule,
    )
    .await
    {
        error!("Application error: {}", err);
    }
}
