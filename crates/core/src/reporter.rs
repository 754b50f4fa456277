//! # Result Reporter
//!
//! Folds the teardown and recreation reports, or the error that stopped the
//! pipeline, into one message that fits in a single Discord reply.

use std::fmt::Write;

use crate::models::report::{FailedItem, RecreationReport, TeardownReport};
use crate::pipeline::SetupOutcome;
use crate::prompt::Verbosity;

/// Discord's limit for message content.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Listed entries per section before the rest is summarized.
const MAX_LISTED: usize = 10;

pub const FAILURE_MESSAGE: &str = "❌ Error setting up server. Check logs.";

pub fn render_outcome(outcome: &SetupOutcome, verbosity: Verbosity) -> String {
    let message = match outcome {
        SetupOutcome::Completed {
            teardown,
            recreation,
            current_name,
        } => render_completed(teardown, recreation, current_name, verbosity),
        SetupOutcome::Failed { teardown, error } => {
            let mut message = FAILURE_MESSAGE.to_string();
            if verbosity == Verbosity::Verbose {
                let _ = write!(message, "\n`{}`", error);
                if !teardown.deleted.is_empty() {
                    let _ = write!(
                        message,
                        "\n{} existing channels and roles had already been removed.",
                        teardown.deleted.len()
                    );
                }
            }
            message
        }
    };

    truncate(message, MAX_MESSAGE_CHARS)
}

fn render_completed(
    teardown: &TeardownReport,
    recreation: &RecreationReport,
    current_name: &str,
    verbosity: Verbosity,
) -> String {
    let failures: Vec<&FailedItem> = teardown
        .failed
        .iter()
        .chain(recreation.failed.iter())
        .collect();

    let mut message = if failures.is_empty() {
        String::from("✅ Server setup complete!")
    } else {
        String::from("⚠️ Server setup finished with errors.")
    };

    let _ = write!(
        message,
        "\n**Server Name:** {}\n**Description:** {}",
        recreation.server_name.as_deref().unwrap_or(current_name),
        recreation
            .server_description
            .as_deref()
            .unwrap_or("No description provided.")
    );

    if verbosity == Verbosity::Verbose {
        let _ = write!(
            message,
            "\nRemoved {} items, created {}.",
            teardown.deleted.len(),
            recreation.created.len()
        );
    }

    push_section(&mut message, "Failed", &failures);

    if verbosity == Verbosity::Verbose {
        let skipped: Vec<_> = recreation.skipped.iter().collect();
        push_section(&mut message, "Skipped", &skipped);
        let warnings: Vec<_> = recreation.warnings.iter().collect();
        push_section(&mut message, "Warnings", &warnings);
    }

    message
}

fn push_section<T: std::fmt::Display>(message: &mut String, title: &str, items: &[T]) {
    if items.is_empty() {
        return;
    }

    let _ = write!(message, "\n\n**{} ({}):**", title, items.len());
    for item in items.iter().take(MAX_LISTED) {
        let _ = write!(message, "\n- {}", item);
    }
    if items.len() > MAX_LISTED {
        let _ = write!(message, "\n...and {} more", items.len() - MAX_LISTED);
    }
}

/// Cut a message to at most `max_chars` characters, marking the cut.
pub fn truncate(message: String, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        return message;
    }

    let keep = max_chars.saturating_sub(1);
    let mut cut: String = message.chars().take(keep).collect();
    cut.push('…');
    cut
}
