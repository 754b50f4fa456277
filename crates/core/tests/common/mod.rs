#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use guildforge_core::errors::{FailureKind, MutationFailure, MutationResult};
use guildforge_core::models::blueprint::ChannelKind;
use guildforge_core::models::guild::{ExistingChannel, ExistingRole, NewChannel, NewRole};
use guildforge_core::ports::GuildOps;

/// Every call the pipeline made against the guild, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListChannels,
    ListRoles,
    DeleteChannel(u64),
    DeleteRole(u64),
    EditName(String),
    EditDescription(String),
    CreateRole(NewRole),
    CreateCategory(String),
    CreateChannel(NewChannel),
    ListTextChannels,
    SendMessage(u64, String),
}

impl Call {
    pub fn is_creation(&self) -> bool {
        matches!(
            self,
            Call::CreateRole(_) | Call::CreateCategory(_) | Call::CreateChannel(_)
        )
    }
}

/// In-memory guild that records calls and fails the ones it is told to.
pub struct RecordingGuild {
    pub channels: Vec<ExistingChannel>,
    pub roles: Vec<ExistingRole>,
    /// Names whose creation or deletion is rejected.
    pub fail_names: HashSet<String>,
    /// Ids whose deletion is rejected.
    pub fail_ids: HashSet<u64>,
    calls: Mutex<Vec<Call>>,
    created_text: Mutex<Vec<ExistingChannel>>,
    next_id: AtomicU64,
}

impl RecordingGuild {
    pub fn new(channels: Vec<ExistingChannel>, roles: Vec<ExistingRole>) -> Self {
        Self {
            channels,
            roles,
            fail_names: HashSet::new(),
            fail_ids: HashSet::new(),
            calls: Mutex::new(Vec::new()),
            created_text: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1000),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn failing_name(mut self, name: &str) -> Self {
        self.fail_names.insert(name.to_string());
        self
    }

    pub fn failing_id(mut self, id: u64) -> Self {
        self.fail_ids.insert(id);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_name(&self, name: &str) -> MutationResult<()> {
        if self.fail_names.contains(name) {
            return Err(MutationFailure::new(
                FailureKind::PermissionDenied,
                "Missing Permissions",
            ));
        }
        Ok(())
    }

    fn check_id(&self, id: u64) -> MutationResult<()> {
        if self.fail_ids.contains(&id) {
            return Err(MutationFailure::new(FailureKind::NotFound, "Unknown Channel"));
        }
        Ok(())
    }

    fn allocate(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl GuildOps for RecordingGuild {
    async fn list_channels(&self) -> MutationResult<Vec<ExistingChannel>> {
        self.push(Call::ListChannels);
        Ok(self.channels.clone())
    }

    async fn list_roles(&self) -> MutationResult<Vec<ExistingRole>> {
        self.push(Call::ListRoles);
        Ok(self.roles.clone())
    }

    async fn delete_channel(&self, channel_id: u64) -> MutationResult<()> {
        self.push(Call::DeleteChannel(channel_id));
        self.check_id(channel_id)
    }

    async fn delete_role(&self, role_id: u64) -> MutationResult<()> {
        self.push(Call::DeleteRole(role_id));
        self.check_id(role_id)
    }

    async fn edit_server_name(&self, name: String) -> MutationResult<()> {
        self.push(Call::EditName(name.clone()));
        self.check_name(&name)
    }

    async fn edit_server_description(&self, description: String) -> MutationResult<()> {
        self.push(Call::EditDescription(description.clone()));
        self.check_name(&description)
    }

    async fn create_role(&self, role: NewRole) -> MutationResult<u64> {
        self.push(Call::CreateRole(role.clone()));
        self.check_name(&role.name)?;
        Ok(self.allocate())
    }

    async fn create_category(&self, name: String) -> MutationResult<u64> {
        self.push(Call::CreateCategory(name.clone()));
        self.check_name(&name)?;
        Ok(self.allocate())
    }

    async fn create_channel(&self, channel: NewChannel) -> MutationResult<u64> {
        self.push(Call::CreateChannel(channel.clone()));
        self.check_name(&channel.name)?;
        let id = self.allocate();
        if channel.kind == ChannelKind::Text {
            self.created_text.lock().unwrap().push(ExistingChannel {
                id,
                name: channel.name.clone(),
            });
        }
        Ok(id)
    }

    async fn list_text_channels(&self) -> MutationResult<Vec<ExistingChannel>> {
        self.push(Call::ListTextChannels);
        Ok(self.created_text.lock().unwrap().clone())
    }

    async fn send_message(&self, channel_id: u64, content: String) -> MutationResult<()> {
        self.push(Call::SendMessage(channel_id, content));
        Ok(())
    }
}

pub fn channel(id: u64, name: &str) -> ExistingChannel {
    ExistingChannel {
        id,
        name: name.to_string(),
    }
}

pub fn role(id: u64, name: &str) -> ExistingRole {
    ExistingRole {
        id,
        name: name.to_string(),
    }
}

/// A complete, valid response for the theme "pirates".
pub const PIRATES_JSON: &str = r##"{
  "server_name": "The Black Pearl",
  "server_description": "Hoist the colours and join the crew!",
  "roles": [
    {"name": "Captain", "color": "#8B0000", "permissions": ["administrator"]},
    {"name": "First Mate", "color": "#DAA520", "permissions": ["manage_messages", "kick_members"]},
    {"name": "Deckhand", "color": "#1E90FF", "permissions": ["send_messages", "connect", "speak"]}
  ],
  "categories": [
    {
      "name": "Info",
      "channels": [
        {"name": "📜rules", "type": "text"},
        {"name": "📢announcements", "type": "text"},
        {"name": "ℹ️info", "type": "text"}
      ]
    },
    {
      "name": "The Tavern",
      "channels": [
        {"name": "🍺grog-talk", "type": "text"},
        {"name": "🏴‍☠️shanties", "type": "voice"}
      ]
    }
  ],
  "welcome": {"channel": "📢announcements", "message": "Ahoy, ye scallywags!"}
}"##;
