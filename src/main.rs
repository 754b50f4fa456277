use color_eyre::eyre::Result;
use dotenv::dotenv;
use guildforge_discord_bot::config::{BotConfig, log_level};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables before LOG_LEVEL is read
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(std::env::var("LOG_LEVEL").ok().as_deref()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting guildforge bot");

    let config = BotConfig::from_env()?;

    match guildforge_discord_bot::start_bot(config).await {
        Ok(_) => info!("Discord bot shut down gracefully"),
        Err(e) => error!("Discord bot error: {}", e),
    }

    Ok(())
}
