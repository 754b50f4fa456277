//! # Schema Validator
//!
//! Turns the raw text returned by the chat model into a [`GuildBlueprint`].
//! Structural problems (unparseable JSON, missing `roles`/`categories`, a
//! missing Info category) reject the whole response. Problems with single
//! entries (bad colors, unknown permissions, channels of an unknown kind) are
//! normalized or dropped and reported back as skipped items or warnings.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{GuildError, GuildResult};
use crate::models::blueprint::{
    CategorySpec, ChannelKind, ChannelSpec, GuildBlueprint, INFO_CATEGORY, INFO_CHANNELS,
    RoleSpec, WelcomeSpec,
};
use crate::models::permissions::{Color, Permissions};
use crate::models::report::{ItemKind, SkippedItem};

/// A blueprint together with the non-fatal notes gathered while validating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBlueprint {
    pub blueprint: GuildBlueprint,
    pub skipped: Vec<SkippedItem>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawBlueprint {
    server_name: Option<Value>,
    server_description: Option<Value>,
    description: Option<Value>,
    roles: Vec<Value>,
    categories: Vec<Value>,
    welcome: Option<Value>,
}

/// Remove a surrounding Markdown code fence, if any.
///
/// Handles a leading fence with an optional language tag (` ```json `) and a
/// trailing fence. Text without a fence is returned trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            // Single-line fence: drop the language tag glued to the fence.
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Parse and normalize the model's response into a blueprint.
///
/// # Errors
///
/// Returns [`GuildError::MalformedResponse`] when the text is not JSON, when
/// `roles` or `categories` is missing or not an array, or when the Info
/// category or one of its mandated channels is absent.
pub fn parse_blueprint(raw: &str) -> GuildResult<ValidatedBlueprint> {
    let json = strip_code_fences(raw);
    let parsed: RawBlueprint = serde_json::from_str(json)
        .map_err(|e| GuildError::MalformedResponse(format!("invalid blueprint JSON: {}", e)))?;

    let mut validator = Validator::default();

    let roles = validator.roles(parsed.roles);
    let categories = validator.categories(parsed.categories);
    check_info_category(&categories)?;

    let server_description = non_empty_str(parsed.server_description.as_ref())
        .or_else(|| non_empty_str(parsed.description.as_ref()));

    let blueprint = GuildBlueprint {
        server_name: non_empty_str(parsed.server_name.as_ref()),
        server_description,
        roles,
        categories,
        welcome: parsed.welcome.as_ref().and_then(welcome),
    };

    debug!(
        roles = blueprint.roles.len(),
        categories = blueprint.categories.len(),
        channels = blueprint.channel_count(),
        skipped = validator.skipped.len(),
        "Blueprint validated"
    );

    Ok(ValidatedBlueprint {
        blueprint,
        skipped: validator.skipped,
        warnings: validator.warnings,
    })
}

#[derive(Default)]
struct Validator {
    skipped: Vec<SkippedItem>,
    warnings: Vec<String>,
}

impl Validator {
    fn skip(&mut self, kind: ItemKind, name: &str, reason: impl Into<String>) {
        let reason = reason.into();
        warn!("Skipping {} `{}`: {}", kind, name, reason);
        self.skipped.push(SkippedItem {
            kind,
            name: name.to_string(),
            reason,
        });
    }

    fn roles(&mut self, raw: Vec<Value>) -> Vec<RoleSpec> {
        let mut seen = HashSet::new();
        let mut roles = Vec::with_capacity(raw.len());

        for entry in raw {
            let Some(name) = non_empty_str(entry.get("name")) else {
                self.skip(ItemKind::Role, "<unnamed>", "missing role name");
                continue;
            };

            if !seen.insert(name.clone()) {
                self.skip(ItemKind::Role, &name, "duplicate role name");
                continue;
            }

            let color = self.color(&name, entry.get("color").or_else(|| entry.get("colour")));
            let permissions = self.permissions(&name, entry.get("permissions"));

            roles.push(RoleSpec {
                name,
                color,
                permissions,
            });
        }

        roles
    }

    fn color(&mut self, role: &str, value: Option<&Value>) -> Color {
        let parsed = match value {
            None | Some(Value::Null) => return Color::GRAY,
            Some(Value::String(hex)) => Color::parse_hex(hex),
            Some(Value::Number(n)) => n
                .as_u64()
                .filter(|v| *v <= 0xFF_FF_FF)
                .map(|v| Color(v as u32)),
            Some(_) => None,
        };

        parsed.unwrap_or_else(|| {
            self.warnings
                .push(format!("role `{}`: invalid color, using gray", role));
            Color::GRAY
        })
    }

    fn permissions(&mut self, role: &str, value: Option<&Value>) -> Permissions {
        let names = match value {
            None | Some(Value::Null) => return Permissions::empty(),
            Some(Value::Array(names)) => names,
            Some(_) => {
                self.warnings
                    .push(format!("role `{}`: permissions is not a list, ignoring", role));
                return Permissions::empty();
            }
        };

        let mut permissions = Permissions::empty();
        for name in names {
            match name.as_str().and_then(Permissions::from_permission_name) {
                Some(flag) => permissions |= flag,
                None => self.warnings.push(format!(
                    "role `{}`: unknown permission {}",
                    role, name
                )),
            }
        }
        permissions
    }

    fn categories(&mut self, raw: Vec<Value>) -> Vec<CategorySpec> {
        let mut categories = Vec::with_capacity(raw.len());

        for entry in raw {
            let Some(name) = non_empty_str(entry.get("name")) else {
                self.skip(ItemKind::Category, "<unnamed>", "missing category name");
                continue;
            };

            let channels = match entry.get("channels") {
                Some(Value::Array(channels)) => channels
                    .iter()
                    .filter_map(|channel| self.channel(&name, channel))
                    .collect(),
                None | Some(Value::Null) => Vec::new(),
                Some(_) => {
                    self.warnings
                        .push(format!("category `{}`: channels is not a list", name));
                    Vec::new()
                }
            };

            categories.push(CategorySpec { name, channels });
        }

        categories
    }

    fn channel(&mut self, category: &str, entry: &Value) -> Option<ChannelSpec> {
        let Some(name) = non_empty_str(entry.get("name")) else {
            self.skip(
                ItemKind::Channel,
                "<unnamed>",
                format!("missing channel name in category `{}`", category),
            );
            return None;
        };

        let kind_value = entry.get("type").or_else(|| entry.get("kind"));
        match kind_value.and_then(Value::as_str).and_then(ChannelKind::parse) {
            Some(kind) => Some(ChannelSpec { name, kind }),
            None => {
                let shown = kind_value.map(Value::to_string).unwrap_or_else(|| "none".to_string());
                self.skip(
                    ItemKind::Channel,
                    &name,
                    format!("unsupported channel type {}", shown),
                );
                None
            }
        }
    }
}

fn check_info_category(categories: &[CategorySpec]) -> GuildResult<()> {
    let info = categories
        .iter()
        .find(|c| c.name.trim().eq_ignore_ascii_case(INFO_CATEGORY))
        .ok_or_else(|| {
            GuildError::MalformedResponse(format!("missing mandatory `{}` category", INFO_CATEGORY))
        })?;

    for required in INFO_CHANNELS {
        let wanted = canonical_channel_name(required);
        if !info
            .channels
            .iter()
            .any(|ch| ch.kind == ChannelKind::Text && canonical_channel_name(&ch.name) == wanted)
        {
            return Err(GuildError::MalformedResponse(format!(
                "`{}` category is missing the `{}` text channel",
                INFO_CATEGORY, required
            )));
        }
    }

    Ok(())
}

/// Compare channel names ignoring case and emoji variation selectors.
fn canonical_channel_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '\u{FE0F}')
        .flat_map(char::to_lowercase)
        .collect()
}

fn welcome(value: &Value) -> Option<WelcomeSpec> {
    let channel_name =
        non_empty_str(value.get("channel")).or_else(|| non_empty_str(value.get("channel_name")))?;
    let message = non_empty_str(value.get("message"))?;
    Some(WelcomeSpec {
        channel_name,
        message,
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
