use std::fmt;

use super::permissions::{Color, Permissions};

/// Name of the category every blueprint must carry.
pub const INFO_CATEGORY: &str = "Info";

/// Text channels the Info category must contain.
pub const INFO_CHANNELS: [&str; 3] = ["📜rules", "📢announcements", "ℹ️info"];

/// The validated guild layout derived from one AI response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildBlueprint {
    pub server_name: Option<String>,
    pub server_description: Option<String>,
    pub roles: Vec<RoleSpec>,
    pub categories: Vec<CategorySpec>,
    pub welcome: Option<WelcomeSpec>,
}

impl GuildBlueprint {
    /// Total number of channels across all categories.
    pub fn channel_count(&self) -> usize {
        self.categories.iter().map(|c| c.channels.len()).sum()
    }

    /// Whether a channel with exactly this name exists anywhere in the layout.
    pub fn has_channel(&self, name: &str) -> bool {
        self.categories
            .iter()
            .flat_map(|c| c.channels.iter())
            .any(|ch| ch.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSpec {
    pub name: String,
    pub color: Color,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub name: String,
    pub channels: Vec<ChannelSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub name: String,
    pub kind: ChannelKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Text,
    Voice,
}

impl ChannelKind {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "text" => Some(ChannelKind::Text),
            "voice" => Some(ChannelKind::Voice),
            _ => None,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Text => f.write_str("text"),
            ChannelKind::Voice => f.write_str("voice"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeSpec {
    pub channel_name: String,
    pub message: String,
}
