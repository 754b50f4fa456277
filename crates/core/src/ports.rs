//! Traits for the collaborators the pipeline drives.
//!
//! The Discord adapter implements [`GuildOps`], the AI client implements
//! [`TextGenerator`] and [`ImageGenerator`]. `mockall` mocks are generated for
//! each so tests can script the platform and the model.

use async_trait::async_trait;
use mockall::automock;

use crate::errors::{GuildResult, MutationResult};
use crate::models::guild::{ExistingChannel, ExistingRole, NewChannel, NewRole};

/// Guild-scoped platform operations.
///
/// Every mutation reports its own failure; callers decide whether to continue.
#[automock]
#[async_trait]
pub trait GuildOps: Send + Sync {
    async fn list_channels(&self) -> MutationResult<Vec<ExistingChannel>>;

    async fn list_roles(&self) -> MutationResult<Vec<ExistingRole>>;

    async fn delete_channel(&self, channel_id: u64) -> MutationResult<()>;

    async fn delete_role(&self, role_id: u64) -> MutationResult<()>;

    async fn edit_server_name(&self, name: String) -> MutationResult<()>;

    async fn edit_server_description(&self, description: String) -> MutationResult<()>;

    /// Create a role and return its id.
    async fn create_role(&self, role: NewRole) -> MutationResult<u64>;

    /// Create a category and return its id.
    async fn create_category(&self, name: String) -> MutationResult<u64>;

    /// Create a text or voice channel under a category and return its id.
    async fn create_channel(&self, channel: NewChannel) -> MutationResult<u64>;

    async fn list_text_channels(&self) -> MutationResult<Vec<ExistingChannel>>;

    async fn send_message(&self, channel_id: u64, content: String) -> MutationResult<()>;
}

/// One-shot chat completion.
#[automock]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a single user prompt and return the assistant's text.
    async fn complete(&self, prompt: String) -> GuildResult<String>;
}

/// One-shot image generation plus retrieval of the result.
#[automock]
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Request an image for the prompt and return its URL.
    async fn generate_image(&self, prompt: String) -> GuildResult<String>;

    /// Fetch the bytes behind an image URL.
    async fn download(&self, url: String) -> GuildResult<Vec<u8>>;
}
