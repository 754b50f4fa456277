use guildforge_ai::OpenAiClient;
use serenity::{
    async_trait,
    model::{
        application::{
            command::Command,
            interaction::{
                Interaction, InteractionResponseType,
                application_command::{ApplicationCommandInteraction, CommandDataOptionValue},
            },
        },
        gateway::Ready,
        id::GuildId,
    },
    prelude::*,
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub mod icon;
pub mod setup;

use crate::commands::{icon::GENERATE_ICON_COMMAND, register_commands, setup::SETUP_COMMAND};
use crate::config::BotConfig;

/// State built once at startup and shared by every interaction.
pub struct AppContext {
    pub config: BotConfig,
    pub ai: OpenAiClient,
}

/// Main Discord handler that processes all events.
pub struct Handler {
    app: Arc<AppContext>,
}

impl Handler {
    pub fn new(app: Arc<AppContext>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        let set = self.app.config.commands;

        // Guild commands show up immediately, global ones can take an hour.
        if let Some(test_guild_id) = self.app.config.test_guild_id {
            match GuildId(test_guild_id)
                .set_application_commands(&ctx.http, |commands| register_commands(commands, set))
                .await
            {
                Ok(cmds) => {
                    info!("Guild commands registered for {}: {}", test_guild_id, cmds.len());
                }
                Err(why) => {
                    error!("Error registering guild commands: {:?}", why);
                }
            }
        }

        match Command::set_global_application_commands(&ctx.http, |commands| {
            register_commands(commands, set)
        })
        .await
        {
            Ok(cmds) => {
                info!("Global commands registered successfully! Total commands: {}", cmds.len());
                for cmd in cmds {
                    info!("Command registered: /{} - {}", cmd.name, cmd.description);
                }
            }
            Err(why) => {
                error!("Error registering global commands: {:?}", why);
            }
        }
    }

    /// Dispatch slash commands to their handlers.
    ///
    /// A handler that returns an error gets one error reply, sent as a fresh
    /// response or as the follow-up depending on whether it had deferred.
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::ApplicationCommand(command) = interaction else {
            return;
        };
        info!("Received command: {}", command.data.name);

        let handler_ctx = HandlerContext {
            ctx: ctx.clone(),
            app: self.app.clone(),
        };

        let result = match command.data.name.as_str() {
            SETUP_COMMAND if self.app.config.commands.includes_setup() => {
                setup::handle_setup_command(handler_ctx, &command).await
            }
            GENERATE_ICON_COMMAND => icon::handle_generate_icon_command(handler_ctx, &command).await,
            _ => {
                warn!("Unknown command: {}", command.data.name);
                Err(eyre::eyre!("Unknown command"))
            }
        };

        if let Err(e) = result {
            error!("Error handling command: {:?}", e);
            send_error_reply(&ctx, &command, &e.to_string()).await;
        }
    }
}

/// Shared context for command handlers.
pub struct HandlerContext {
    pub ctx: Context,
    pub app: Arc<AppContext>,
}

/// Read a string option off a slash command.
///
/// # Arguments
///
/// * `command` - The interaction carrying the options
/// * `name` - Option name as registered
///
/// # Returns
///
/// The resolved string value, or `None` if the option is absent or not a string.
pub fn string_option<'a>(command: &'a ApplicationCommandInteraction, name: &str) -> Option<&'a str> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| match &option.resolved {
            Some(CommandDataOptionValue::String(value)) => Some(value.as_str()),
            _ => None,
        })
}

/// Best-effort error reply.
///
/// Handlers defer before doing any work, so a fresh response is only possible
/// when they failed early; otherwise the error goes out as the follow-up.
async fn send_error_reply(ctx: &Context, command: &ApplicationCommandInteraction, message: &str) {
    let content = format!("Error: {}", message);

    let initial = command
        .create_interaction_response(&ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| m.content(&content).ephemeral(true))
        })
        .await;

    if initial.is_err() {
        if let Err(why) = command
            .create_followup_message(&ctx.http, |m| m.content(&content))
            .await
        {
            error!("Failed to send error response: {:?}", why);
        }
    }
}
