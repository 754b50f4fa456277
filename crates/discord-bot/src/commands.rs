use serenity::builder::CreateApplicationCommands;

use crate::config::CommandSet;

pub mod icon;
pub mod setup;

/// Register the slash commands served by this process.
///
/// # Arguments
///
/// * `commands` - Builder that receives the command definitions
/// * `set` - Which commands to include; `/generateicon` is always registered
///
/// # Returns
///
/// The same builder, for chaining inside serenity's registration closures.
pub fn register_commands(
    commands: &mut CreateApplicationCommands,
    set: CommandSet,
) -> &mut CreateApplicationCommands {
    if set.includes_setup() {
        commands.create_application_command(|command| {
            *command = setup::setup_command();
            command
        });
    }

    commands.create_application_command(|command| {
        *command = icon::generate_icon_command();
        command
    });

    commands
}
