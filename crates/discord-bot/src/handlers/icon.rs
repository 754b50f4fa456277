use std::borrow::Cow;

use eyre::{Result, eyre};
use guildforge_ai::{ICON_FILENAME, generate_icon};
use serenity::model::{
    application::interaction::{
        InteractionResponseType, application_command::ApplicationCommandInteraction,
    },
    channel::AttachmentType,
};
use tracing::{error, info};

use crate::handlers::{HandlerContext, string_option};

/// Handle the /generateicon command
///
/// Defers, generates the icon and follows up with either the PNG attached as
/// `server_icon.png` or a one-line failure message.
///
/// # Returns
///
/// * `Ok(())` once a follow-up was sent
/// * `Err` if the theme is empty or Discord rejected the deferral or the follow-up
pub async fn handle_generate_icon_command(
    ctx: HandlerContext,
    command: &ApplicationCommandInteraction,
) -> Result<()> {
    let theme = string_option(command, "theme")
        .map(str::trim)
        .filter(|theme| !theme.is_empty())
        .ok_or_else(|| eyre!("Please provide a theme"))?
        .to_string();

    let http = ctx.ctx.http.clone();

    command
        .create_interaction_response(&http, |r| {
            r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
        })
        .await?;

    let max_theme_chars = ctx.app.config.policy.max_theme_chars;
    match generate_icon(&ctx.app.ai, &theme, max_theme_chars).await {
        Ok(png) => {
            info!(bytes = png.len(), "Sending generated icon");
            command
                .create_followup_message(&http, |m| {
                    m.add_file(AttachmentType::Bytes {
                        data: Cow::Owned(png),
                        filename: ICON_FILENAME.to_string(),
                    })
                })
                .await?;
        }
        Err(e) => {
            error!("Icon generation failed: {}", e);
            command
                .create_followup_message(&http, |m| {
                    m.content(format!("❌ Failed to generate icon: {}", e))
                })
                .await?;
        }
    }

    Ok(())
}
