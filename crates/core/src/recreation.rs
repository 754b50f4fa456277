//! # Recreation Executor
//!
//! Applies a [`GuildBlueprint`] to the guild. The order matters: server
//! metadata, then every role, then each category followed by its channels,
//! then the welcome message once its target channel can exist. Every item is
//! attempted even when earlier ones failed; failures land in the report.

use tracing::{debug, info, warn};

use crate::models::blueprint::{CategorySpec, GuildBlueprint, RoleSpec, WelcomeSpec};
use crate::models::guild::{NewChannel, NewRole};
use crate::models::report::{ItemKind, RecreationReport};
use crate::ports::GuildOps;

pub async fn run_recreation(ops: &dyn GuildOps, blueprint: &GuildBlueprint) -> RecreationReport {
    let mut report = RecreationReport::default();

    apply_server_metadata(ops, blueprint, &mut report).await;

    for role in &blueprint.roles {
        create_role(ops, role, &mut report).await;
    }

    for category in &blueprint.categories {
        create_category(ops, category, &mut report).await;
    }

    if let Some(welcome) = &blueprint.welcome {
        send_welcome(ops, welcome, &mut report).await;
    }

    info!(
        created = report.created.len(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
        "Recreation finished"
    );
    report
}

async fn apply_server_metadata(
    ops: &dyn GuildOps,
    blueprint: &GuildBlueprint,
    report: &mut RecreationReport,
) {
    if let Some(name) = &blueprint.server_name {
        match ops.edit_server_name(name.clone()).await {
            Ok(()) => report.server_name = Some(name.clone()),
            Err(failure) => {
                warn!("Failed to change server name: {}", failure);
                report.record::<()>(ItemKind::ServerName, name, Err(failure));
            }
        }
    }

    if let Some(description) = &blueprint.server_description {
        match ops.edit_server_description(description.clone()).await {
            Ok(()) => report.server_description = Some(description.clone()),
            Err(failure) => {
                warn!("Failed to change server description: {}", failure);
                report.record::<()>(ItemKind::ServerDescription, description, Err(failure));
            }
        }
    }
}

async fn create_role(ops: &dyn GuildOps, role: &RoleSpec, report: &mut RecreationReport) {
    let request = NewRole {
        name: role.name.clone(),
        color: role.color,
        permissions: role.permissions,
    };

    let result = ops.create_role(request).await;
    if let Err(e) = &result {
        warn!("Failed to create role {}: {}", role.name, e);
    }
    report.record(ItemKind::Role, &role.name, result);
}

async fn create_category(ops: &dyn GuildOps, category: &CategorySpec, report: &mut RecreationReport) {
    let result = ops.create_category(category.name.clone()).await;
    if let Err(e) = &result {
        warn!("Failed to create category {}: {}", category.name, e);
    }

    let Some(parent_id) = report.record(ItemKind::Category, &category.name, result) else {
        for channel in &category.channels {
            report.skip(
                ItemKind::Channel,
                &channel.name,
                format!("parent category `{}` was not created", category.name),
            );
        }
        return;
    };

    for channel in &category.channels {
        let request = NewChannel {
            name: channel.name.clone(),
            kind: channel.kind,
            parent_id,
        };

        let result = ops.create_channel(request).await;
        if let Err(e) = &result {
            warn!("Failed to create {} channel {}: {}", channel.kind, channel.name, e);
        }
        report.record(ItemKind::Channel, &channel.name, result);
    }
}

async fn send_welcome(ops: &dyn GuildOps, welcome: &WelcomeSpec, report: &mut RecreationReport) {
    let channels = match ops.list_text_channels().await {
        Ok(channels) => channels,
        Err(failure) => {
            warn!("Failed to list text channels for welcome message: {}", failure);
            report.record::<()>(ItemKind::Welcome, &welcome.channel_name, Err(failure));
            return;
        }
    };

    let Some(target) = channels.iter().find(|c| c.name == welcome.channel_name) else {
        debug!("Welcome channel {} not found, skipping", welcome.channel_name);
        report.skip(
            ItemKind::Welcome,
            &welcome.channel_name,
            "no text channel with that name",
        );
        return;
    };

    match ops.send_message(target.id, welcome.message.clone()).await {
        Ok(()) => report.welcome_sent = true,
        Err(failure) => {
            warn!("Failed to send welcome message: {}", failure);
            report.record::<()>(ItemKind::Welcome, &welcome.channel_name, Err(failure));
        }
    }
}
