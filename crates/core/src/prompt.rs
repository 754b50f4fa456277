//! Prompt templates for the setup and icon commands.

use crate::models::blueprint::{INFO_CATEGORY, INFO_CHANNELS};

/// How much detail the final reply carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Brief,
    Verbose,
}

/// Knobs for the setup prompt and reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPolicy {
    /// Minimum number of roles the model is asked for.
    pub min_roles: usize,
    /// Minimum number of channels across all categories.
    pub min_channels: usize,
    /// Themes longer than this are cut before being embedded.
    pub max_theme_chars: usize,
    pub verbosity: Verbosity,
}

impl Default for PromptPolicy {
    fn default() -> Self {
        Self {
            min_roles: 5,
            min_channels: 20,
            max_theme_chars: 200,
            verbosity: Verbosity::Brief,
        }
    }
}

/// Trim a theme and cut it to at most `max_chars` characters.
pub fn cap_theme(theme: &str, max_chars: usize) -> &str {
    let theme = theme.trim();
    match theme.char_indices().nth(max_chars) {
        Some((byte_index, _)) => theme[..byte_index].trim_end(),
        None => theme,
    }
}

/// Build the instruction prompt that asks for a guild layout as JSON.
pub fn setup_prompt(theme: &str, policy: &PromptPolicy) -> String {
    let theme = cap_theme(theme, policy.max_theme_chars);
    let [rules, announcements, info] = INFO_CHANNELS;

    format!(
        r#"You are helping set up a Discord server based on the theme: "{theme}".
Return ONLY valid JSON with the following structure:
- server_name (string)
- server_description (string)
- roles (list of objects with 'name', 'color' (hex string), and 'permissions' (list of permission strings))
- categories (list of objects with 'name' and 'channels' list)
- welcome (object with 'channel' and 'message')

Requirements:
1. Include AT LEAST {min_roles} roles.
2. Include AT LEAST {min_channels} channels total across categories.
3. Add a mandatory category named "{info_category}" with these text channels:
   - {rules}
   - {announcements}
   - {info}
4. All channels must have emoji prefixes relevant to the theme (like 🎮 for gaming).
5. Channels can be "text" or "voice".
6. Permission strings use snake_case names such as "send_messages" or "manage_channels".
7. Ensure descriptions are lively and hook the user.
8. Return no explanations, only well-formed JSON.

Example categories structure:

"categories": [
  {{
    "name": "{info_category}",
    "channels": [
      {{"name": "{rules}", "type": "text"}},
      {{"name": "{announcements}", "type": "text"}},
      {{"name": "{info}", "type": "text"}}
    ]
  }},
  ...
]
"#,
        min_roles = policy.min_roles,
        min_channels = policy.min_channels,
        info_category = INFO_CATEGORY,
    )
}

/// Build the image prompt for a server icon.
pub fn icon_prompt(theme: &str, max_theme_chars: usize) -> String {
    format!(
        "Discord server logo for a theme about '{}', simple and bold icon style",
        cap_theme(theme, max_theme_chars)
    )
}
