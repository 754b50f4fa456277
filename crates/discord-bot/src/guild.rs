//! serenity-backed [`GuildOps`].

use std::sync::Arc;

use async_trait::async_trait;
use guildforge_core::errors::{FailureKind, MutationFailure, MutationResult};
use guildforge_core::models::blueprint::ChannelKind;
use guildforge_core::models::guild::{ExistingChannel, ExistingRole, NewChannel, NewRole};
use guildforge_core::ports::GuildOps;
use serenity::http::Http;
use serenity::model::channel::{ChannelType, GuildChannel};
use serenity::model::id::{ChannelId, GuildId, RoleId};
use serenity::model::permissions::Permissions as DiscordPermissions;
use tracing::debug;

/// One guild, addressed through the REST client.
pub struct SerenityGuild {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl SerenityGuild {
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }

    async fn fetch_channels(&self) -> MutationResult<Vec<GuildChannel>> {
        let mut channels: Vec<GuildChannel> = self
            .guild_id
            .channels(&self.http)
            .await
            .map_err(mutation_failure)?
            .into_values()
            .collect();
        // Children before their categories, then in sidebar order.
        channels.sort_by_key(|c| (c.kind == ChannelType::Category, c.position, c.id.0));
        Ok(channels)
    }
}

/// Classify a serenity error by the HTTP status Discord answered with.
pub fn mutation_failure(err: serenity::Error) -> MutationFailure {
    match &err {
        serenity::Error::Http(http_err) => failure_from_status(
            http_err.status_code().map(|status| status.as_u16()),
            http_err.to_string(),
        ),
        _ => failure_from_status(None, err.to_string()),
    }
}

/// Map a response status, if there was one, to a [`MutationFailure`].
pub fn failure_from_status(status: Option<u16>, message: String) -> MutationFailure {
    match status {
        Some(status) => MutationFailure::new(FailureKind::from_status(status), message),
        None => MutationFailure::other(message),
    }
}

fn existing_channel(channel: GuildChannel) -> ExistingChannel {
    ExistingChannel {
        id: channel.id.0,
        name: channel.name,
    }
}

#[async_trait]
impl GuildOps for SerenityGuild {
    async fn list_channels(&self) -> MutationResult<Vec<ExistingChannel>> {
        Ok(self.fetch_channels().await?.into_iter().map(existing_channel).collect())
    }

    async fn list_roles(&self) -> MutationResult<Vec<ExistingRole>> {
        let mut roles: Vec<_> = self
            .guild_id
            .roles(&self.http)
            .await
            .map_err(mutation_failure)?
            .into_values()
            .collect();
        roles.sort_by_key(|r| (r.position, r.id.0));

        Ok(roles
            .into_iter()
            .map(|r| ExistingRole {
                id: r.id.0,
                name: r.name,
            })
            .collect())
    }

    async fn delete_channel(&self, channel_id: u64) -> MutationResult<()> {
        ChannelId(channel_id)
            .delete(&self.http)
            .await
            .map_err(mutation_failure)?;
        Ok(())
    }

    async fn delete_role(&self, role_id: u64) -> MutationResult<()> {
        self.guild_id
            .delete_role(&self.http, RoleId(role_id))
            .await
            .map_err(mutation_failure)
    }

    async fn edit_server_name(&self, name: String) -> MutationResult<()> {
        // `GuildId::edit` takes `&mut self`.
        let mut guild_id = self.guild_id;
        guild_id
            .edit(&self.http, |g| g.name(name))
            .await
            .map_err(mutation_failure)?;
        Ok(())
    }

    async fn edit_server_description(&self, description: String) -> MutationResult<()> {
        // `GuildId::edit` takes `&mut self`.
        let mut guild_id = self.guild_id;
        guild_id
            .edit(&self.http, |g| g.description(description))
            .await
            .map_err(mutation_failure)?;
        Ok(())
    }

    async fn create_role(&self, role: NewRole) -> MutationResult<u64> {
        let created = self
            .guild_id
            .create_role(&self.http, |r| {
                r.name(&role.name)
                    .colour(u64::from(role.color.value()))
                    .permissions(DiscordPermissions::from_bits_truncate(role.permissions.bits()))
            })
            .await
            .map_err(mutation_failure)?;
        debug!(role = %created.name, id = created.id.0, "Role created");
        Ok(created.id.0)
    }

    async fn create_category(&self, name: String) -> MutationResult<u64> {
        let created = self
            .guild_id
            .create_channel(&self.http, |c| c.name(&name).kind(ChannelType::Category))
            .await
            .map_err(mutation_failure)?;
        Ok(created.id.0)
    }

    async fn create_channel(&self, channel: NewChannel) -> MutationResult<u64> {
        let kind = match channel.kind {
            ChannelKind::Text => ChannelType::Text,
            ChannelKind::Voice => ChannelType::Voice,
        };
        let created = self
            .guild_id
            .create_channel(&self.http, |c| {
                c.name(&channel.name)
                    .kind(kind)
                    .category(ChannelId(channel.parent_id))
            })
            .await
            .map_err(mutation_failure)?;
        Ok(created.id.0)
    }

    async fn list_text_channels(&self) -> MutationResult<Vec<ExistingChannel>> {
        Ok(self
            .fetch_channels()
            .await?
            .into_iter()
            .filter(|c| c.kind == ChannelType::Text)
            .map(existing_channel)
            .collect())
    }

    async fn send_message(&self, channel_id: u64, content: String) -> MutationResult<()> {
        ChannelId(channel_id)
            .say(&self.http, content)
            .await
            .map_err(mutation_failure)?;
        Ok(())
    }
}
