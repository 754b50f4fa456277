use color_eyre::eyre::Result;
use dotenv::dotenv;
use guildforge_discord_bot::config::{BotConfig, log_level};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

/// Standalone bot serving only `/generateicon`, usually under its own token.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(std::env::var("LOG_LEVEL").ok().as_deref()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting guildforge icon bot");

    let config = BotConfig::icon_bot_from_env()?;

    if let Err(e) = guildforge_discord_bot::start_bot(config).await {
        error!("Icon bot error: {}", e);
    }

    Ok(())
}
