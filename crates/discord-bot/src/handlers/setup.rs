use eyre::{Result, eyre};
use guildforge_core::models::guild::ProtectedItems;
use guildforge_core::pipeline::{SetupRequest, run_setup};
use serenity::model::application::interaction::{
    InteractionResponseType, application_command::ApplicationCommandInteraction,
};
use tracing::{info, warn};

use crate::guild::SerenityGuild;
use crate::handlers::{HandlerContext, string_option};

/// Fallback when the guild's current name cannot be fetched.
const UNKNOWN_SERVER_NAME: &str = "this server";

/// Handle the /setup command
///
/// Defers the response, runs the full teardown and rebuild against the guild
/// the command came from, and answers with exactly one follow-up summary. The
/// invoking channel and `@everyone` survive the teardown.
///
/// # Returns
///
/// * `Ok(())` once the summary was sent, even if the setup itself failed
/// * `Err` if the command was used outside a guild, the theme is empty, or
///   Discord rejected the deferral or the follow-up
pub async fn handle_setup_command(
    ctx: HandlerContext,
    command: &ApplicationCommandInteraction,
) -> Result<()> {
    let guild_id = command
        .guild_id
        .ok_or_else(|| eyre!("Command must be used in a server"))?;
    let theme = string_option(command, "theme")
        .map(str::trim)
        .filter(|theme| !theme.is_empty())
        .ok_or_else(|| eyre!("Please provide a theme"))?
        .to_string();

    let http = ctx.ctx.http.clone();

    // Teardown and generation take far longer than the 3s acknowledgement window.
    command
        .create_interaction_response(&http, |r| {
            r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
        })
        .await?;

    let current_name = match guild_id.to_partial_guild(&http).await {
        Ok(guild) => guild.name,
        Err(e) => {
            warn!("Could not fetch guild {}: {:?}", guild_id, e);
            UNKNOWN_SERVER_NAME.to_string()
        }
    };

    info!(guild = guild_id.0, user = %command.user.name, "Starting server setup");

    let policy = ctx.app.config.policy.clone();
    let verbosity = policy.verbosity;
    let request = SetupRequest {
        theme,
        protected: ProtectedItems {
            channel_id: command.channel_id.0,
            role_id: guild_id.0,
        },
        current_name,
        policy,
    };

    let guild = SerenityGuild::new(http.clone(), guild_id);
    let outcome = run_setup(&guild, &ctx.app.ai, request).await;
    info!(guild = guild_id.0, success = outcome.is_success(), "Server setup finished");

    command
        .create_followup_message(&http, |m| m.content(outcome.reply(verbosity)))
        .await?;

    Ok(())
}
