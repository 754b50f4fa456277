use eyre::{Result, eyre};
use guildforge_ai::OpenAiSettings;
use guildforge_core::prompt::{PromptPolicy, Verbosity};
use std::env;
use std::str::FromStr;
use tracing::Level;

/// Which slash commands a bot process registers and answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSet {
    /// `/setup` and `/generateicon`
    All,
    /// Only `/generateicon`, for the standalone icon bot
    IconOnly,
}

impl CommandSet {
    pub fn includes_setup(self) -> bool {
        matches!(self, CommandSet::All)
    }
}

/// Configuration for the Discord bot.
///
/// Everything comes from environment variables; see [`BotConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord bot token (required)
    pub token: String,
    /// OpenAI connection and model settings
    pub openai: OpenAiSettings,
    /// Test guild ID for faster command registration during development
    pub test_guild_id: Option<u64>,
    /// Prompt and reply tuning for `/setup`
    pub policy: PromptPolicy,
    /// Commands this process serves
    pub commands: CommandSet,
}

impl BotConfig {
    /// Load the full bot configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), CommandSet::All)
    }

    /// Load configuration for the icon-only bot.
    ///
    /// `ICON_DISCORD_TOKEN` is preferred so both bots can run side by side;
    /// `DISCORD_TOKEN` is the fallback.
    pub fn icon_bot_from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), CommandSet::IconOnly)
    }

    /// Build a configuration from any key lookup.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the value for a variable name, `None` if unset
    /// * `commands` - The command set; decides which token variable is read
    ///
    /// # Returns
    ///
    /// * `Ok(BotConfig)` with defaults filled in for optional variables
    /// * `Err` if a required variable is missing or a value does not parse
    pub fn from_lookup<F>(lookup: F, commands: CommandSet) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = match commands {
            CommandSet::IconOnly => lookup("ICON_DISCORD_TOKEN").or_else(|| lookup("DISCORD_TOKEN")),
            CommandSet::All => lookup("DISCORD_TOKEN"),
        }
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| eyre!("DISCORD_TOKEN environment variable not set"))?;

        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| eyre!("OPENAI_API_KEY environment variable not set"))?;

        let mut openai = OpenAiSettings::new(api_key);
        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            openai.base_url = base_url;
        }
        if let Some(model) = lookup("OPENAI_CHAT_MODEL") {
            openai.chat_model = model;
        }
        if let Some(model) = lookup("OPENAI_IMAGE_MODEL") {
            openai.image_model = model;
        }
        openai.temperature = parse_or(&lookup, "OPENAI_TEMPERATURE", openai.temperature)?;
        openai.timeout_secs = parse_or(&lookup, "OPENAI_TIMEOUT_SECONDS", openai.timeout_secs)?;

        let test_guild_id = lookup("DISCORD_TEST_GUILD_ID")
            .map(|id| {
                id.trim()
                    .parse::<u64>()
                    .map_err(|_| eyre!("DISCORD_TEST_GUILD_ID must be a valid u64"))
            })
            .transpose()?;

        let defaults = PromptPolicy::default();
        let policy = PromptPolicy {
            min_roles: parse_or(&lookup, "SETUP_MIN_ROLES", defaults.min_roles)?,
            min_channels: parse_or(&lookup, "SETUP_MIN_CHANNELS", defaults.min_channels)?,
            max_theme_chars: parse_or(&lookup, "SETUP_MAX_THEME_CHARS", defaults.max_theme_chars)?,
            verbosity: match lookup("SETUP_VERBOSE") {
                Some(flag) if is_truthy(&flag) => Verbosity::Verbose,
                _ => Verbosity::Brief,
            },
        };

        Ok(Self {
            token,
            openai,
            test_guild_id,
            policy,
            commands,
        })
    }
}

/// Parse `LOG_LEVEL`, defaulting to `info` when unset or unrecognised.
pub fn log_level(value: Option<&str>) -> Level {
    value
        .and_then(|level| Level::from_str(level.trim()).ok())
        .unwrap_or(Level::INFO)
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| eyre!("{} has an invalid value: {}", key, raw)),
        None => Ok(default),
    }
}

fn is_truthy(flag: &str) -> bool {
    matches!(
        flag.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
