use std::fmt;

use crate::errors::{MutationFailure, MutationResult};

/// What a report entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Channel,
    Role,
    Category,
    ServerName,
    ServerDescription,
    Welcome,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::Channel => "channel",
            ItemKind::Role => "role",
            ItemKind::Category => "category",
            ItemKind::ServerName => "server name",
            ItemKind::ServerDescription => "server description",
            ItemKind::Welcome => "welcome message",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub kind: ItemKind,
    pub name: String,
    pub failure: MutationFailure,
}

impl fmt::Display for FailedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`: {}", self.kind, self.name, self.failure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub kind: ItemKind,
    pub name: String,
    pub reason: String,
}

impl fmt::Display for SkippedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`: {}", self.kind, self.name, self.reason)
    }
}

/// Outcome of deleting the pre-existing guild structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub deleted: Vec<String>,
    pub failed: Vec<FailedItem>,
}

impl TeardownReport {
    pub fn record(&mut self, kind: ItemKind, name: &str, result: MutationResult<()>) {
        match result {
            Ok(()) => self.deleted.push(name.to_string()),
            Err(failure) => self.failed.push(FailedItem {
                kind,
                name: name.to_string(),
                failure,
            }),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outcome of building the guild from a blueprint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecreationReport {
    /// Server name actually applied, if the rename went through.
    pub server_name: Option<String>,
    /// Server description actually applied.
    pub server_description: Option<String>,
    pub created: Vec<String>,
    pub failed: Vec<FailedItem>,
    pub skipped: Vec<SkippedItem>,
    pub warnings: Vec<String>,
    pub welcome_sent: bool,
}

impl RecreationReport {
    /// Record a creation attempt, returning the created id on success.
    pub fn record<T>(&mut self, kind: ItemKind, name: &str, result: MutationResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.created.push(name.to_string());
                Some(value)
            }
            Err(failure) => {
                self.failed.push(FailedItem {
                    kind,
                    name: name.to_string(),
                    failure,
                });
                None
            }
        }
    }

    pub fn skip(&mut self, kind: ItemKind, name: &str, reason: impl Into<String>) {
        self.skipped.push(SkippedItem {
            kind,
            name: name.to_string(),
            reason: reason.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
