//! # Setup Pipeline
//!
//! Wires teardown, generation, validation and recreation together for one
//! `/setup` invocation. The pipeline never returns an error: whatever happens
//! ends up in a [`SetupOutcome`], which always renders to exactly one reply.

use tracing::{error, info, instrument, warn};

use crate::errors::{GuildError, MutationFailure};
use crate::generator::generate_structure;
use crate::models::guild::ProtectedItems;
use crate::models::report::{ItemKind, RecreationReport, TeardownReport};
use crate::ports::{GuildOps, TextGenerator};
use crate::prompt::{PromptPolicy, Verbosity};
use crate::recreation::run_recreation;
use crate::reporter;
use crate::teardown::run_teardown;
use crate::validator::parse_blueprint;

/// Everything one `/setup` invocation needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct SetupRequest {
    pub theme: String,
    pub protected: ProtectedItems,
    /// Guild name before the invocation, shown when no new name is applied.
    pub current_name: String,
    pub policy: PromptPolicy,
}

#[derive(Debug)]
pub enum SetupOutcome {
    /// The blueprint was applied; individual items may still have failed.
    Completed {
        teardown: TeardownReport,
        recreation: RecreationReport,
        current_name: String,
    },
    /// Generation or validation failed; nothing was recreated.
    Failed {
        teardown: TeardownReport,
        error: GuildError,
    },
}

impl SetupOutcome {
    /// Render the single reply sent back to the caller.
    pub fn reply(&self, verbosity: Verbosity) -> String {
        reporter::render_outcome(self, verbosity)
    }

    pub fn is_success(&self) -> bool {
        match self {
            SetupOutcome::Completed {
                teardown,
                recreation,
                ..
            } => teardown.is_clean() && recreation.is_clean(),
            SetupOutcome::Failed { .. } => false,
        }
    }
}

/// Run the full reconstruction for one guild.
#[instrument(skip_all, fields(theme = %request.theme))]
pub async fn run_setup(
    ops: &dyn GuildOps,
    generator: &dyn TextGenerator,
    request: SetupRequest,
) -> SetupOutcome {
    let mut teardown = TeardownReport::default();

    let channels = ops.list_channels().await.unwrap_or_else(|failure| {
        warn!("Failed to list channels: {}", failure);
        record_listing_failure(&mut teardown, ItemKind::Channel, failure);
        Vec::new()
    });
    let roles = ops.list_roles().await.unwrap_or_else(|failure| {
        warn!("Failed to list roles: {}", failure);
        record_listing_failure(&mut teardown, ItemKind::Role, failure);
        Vec::new()
    });

    let deleted = run_teardown(ops, &channels, &roles, request.protected).await;
    teardown.deleted.extend(deleted.deleted);
    teardown.failed.extend(deleted.failed);

    let raw = match generate_structure(generator, &request.theme, &request.policy).await {
        Ok(raw) => raw,
        Err(error) => {
            error!("Structure generation failed: {}", error);
            return SetupOutcome::Failed { teardown, error };
        }
    };

    let validated = match parse_blueprint(&raw) {
        Ok(validated) => validated,
        Err(error) => {
            error!("Model returned an unusable blueprint: {}", error);
            return SetupOutcome::Failed { teardown, error };
        }
    };

    let mut recreation = run_recreation(ops, &validated.blueprint).await;
    recreation.skipped.splice(0..0, validated.skipped);
    recreation.warnings.splice(0..0, validated.warnings);

    info!(
        deleted = teardown.deleted.len(),
        created = recreation.created.len(),
        failed = teardown.failed.len() + recreation.failed.len(),
        "Setup finished"
    );

    SetupOutcome::Completed {
        teardown,
        recreation,
        current_name: request.current_name,
    }
}

fn record_listing_failure(report: &mut TeardownReport, kind: ItemKind, failure: MutationFailure) {
    let label = match kind {
        ItemKind::Role => "<role list>",
        _ => "<channel list>",
    };
    report.record(kind, label, Err(failure));
}
