use tracing::{info, warn};

use crate::models::guild::{EVERYONE_ROLE_NAME, ExistingChannel, ExistingRole, ProtectedItems};
use crate::models::report::{ItemKind, TeardownReport};
use crate::ports::GuildOps;

/// Delete every channel and role except the protected ones.
///
/// Channels go first, then roles. A failed deletion is recorded and the loop
/// moves on; nothing is retried and nothing is rolled back.
pub async fn run_teardown(
    ops: &dyn GuildOps,
    channels: &[ExistingChannel],
    roles: &[ExistingRole],
    protected: ProtectedItems,
) -> TeardownReport {
    let mut report = TeardownReport::default();

    for channel in channels.iter().filter(|c| c.id != protected.channel_id) {
        let result = ops.delete_channel(channel.id).await;
        if let Err(e) = &result {
            warn!("Failed to delete channel {}: {}", channel.name, e);
        }
        report.record(ItemKind::Channel, &channel.name, result);
    }

    for role in roles
        .iter()
        .filter(|r| r.id != protected.role_id && r.name != EVERYONE_ROLE_NAME)
    {
        let result = ops.delete_role(role.id).await;
        if let Err(e) = &result {
            warn!("Failed to delete role {}: {}", role.name, e);
        }
        report.record(ItemKind::Role, &role.name, result);
    }

    info!(
        deleted = report.deleted.len(),
        failed = report.failed.len(),
        "Teardown finished"
    );
    report
}
