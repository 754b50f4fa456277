use super::blueprint::ChannelKind;
use super::permissions::{Color, Permissions};

/// A channel that currently exists on the guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingChannel {
    pub id: u64,
    pub name: String,
}

/// A role that currently exists on the guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingRole {
    pub id: u64,
    pub name: String,
}

/// Role creation request handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
    pub color: Color,
    pub permissions: Permissions,
}

/// Channel creation request handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChannel {
    pub name: String,
    pub kind: ChannelKind,
    pub parent_id: u64,
}

/// Items the teardown must leave in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedItems {
    /// The channel the command was issued from.
    pub channel_id: u64,
    /// The implicit `@everyone` role; its id is the guild id.
    pub role_id: u64,
}

pub const EVERYONE_ROLE_NAME: &str = "@everyone";
