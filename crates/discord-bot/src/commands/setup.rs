use serenity::{
    builder::CreateApplicationCommand,
    model::{application::command::CommandOptionType, permissions::Permissions},
};

pub const SETUP_COMMAND: &str = "setup";

/// `/setup theme:<text>`: rebuild the whole server around a theme.
///
/// Restricted to administrators by default since it deletes every channel and
/// role.
pub fn setup_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name(SETUP_COMMAND)
        .description("Rebuild this server's channels and roles around a theme")
        .create_option(|option| {
            option
                .name("theme")
                .description("What the server should be about, e.g. \"pirates\"")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .dm_permission(false);

    command
}
