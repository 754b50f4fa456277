//! Discord front end for guildforge.
//!
//! Registers the slash commands, answers interactions and adapts serenity's
//! REST client to [`guildforge_core::ports::GuildOps`].

use std::sync::Arc;

use eyre::Result;
use guildforge_ai::OpenAiClient;
use serenity::{Client, prelude::GatewayIntents};
use tracing::{error, info};

pub mod commands;
pub mod config;
pub mod guild;
pub mod handlers;

use handlers::{AppContext, Handler};

/// Start the Discord bot and run until it disconnects or Ctrl-C is received.
///
/// Builds the OpenAI client once, shares it with every interaction through
/// [`AppContext`], and connects to the gateway with the `GUILDS` intent only.
///
/// # Arguments
///
/// * `config` - Token, OpenAI settings, prompt policy and the command set to serve
///
/// # Returns
///
/// * `Ok(())` if the bot shut down gracefully
/// * `Err` if the AI client or the gateway client could not be built, or the
///   connection failed
pub async fn start_bot(config: config::BotConfig) -> Result<()> {
    info!("Starting Discord bot ({:?} commands)", config.commands);

    let ai = OpenAiClient::new(config.openai.clone())?;
    let app = Arc::new(AppContext { config, ai });

    let mut client = Client::builder(&app.config.token, GatewayIntents::GUILDS)
        .event_handler(Handler::new(app.clone()))
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, shutting down");
                shard_manager.lock().await.shutdown_all().await;
            }
            Err(e) => error!("Could not listen for Ctrl-C: {}", e),
        }
    });

    info!("Connecting to Discord...");
    client.start().await?;

    Ok(())
}
