use serenity::{builder::CreateApplicationCommand, model::application::command::CommandOptionType};

pub const GENERATE_ICON_COMMAND: &str = "generateicon";

/// `/generateicon theme:<text>`
pub fn generate_icon_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name(GENERATE_ICON_COMMAND)
        .description("Generate a server icon for a theme")
        .create_option(|option| {
            option
                .name("theme")
                .description("Theme for the icon")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .dm_permission(false);

    command
}
