use tracing::{info, instrument};

use crate::errors::GuildResult;
use crate::ports::TextGenerator;
use crate::prompt::{PromptPolicy, setup_prompt};

/// Ask the model for a guild layout and return its raw reply.
///
/// Exactly one request is sent. The reply is not inspected here; hand it to
/// [`crate::validator::parse_blueprint`].
#[instrument(skip(generator, policy), fields(theme_len = theme.len()))]
pub async fn generate_structure(
    generator: &dyn TextGenerator,
    theme: &str,
    policy: &PromptPolicy,
) -> GuildResult<String> {
    let prompt = setup_prompt(theme, policy);
    let raw = generator.complete(prompt).await?;
    info!(response_len = raw.len(), "Received guild structure from model");
    Ok(raw)
}
