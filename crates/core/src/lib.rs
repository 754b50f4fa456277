//! # guildforge core
//!
//! The guild-reconstruction pipeline behind the `/setup` command, independent
//! of any particular chat platform or AI provider.
//!
//! ## Architecture
//!
//! - **Validator**: turns model output into a [`models::blueprint::GuildBlueprint`]
//! - **Teardown**: removes the existing channels and roles
//! - **Generator**: asks the model for a layout
//! - **Recreation**: applies a blueprint in dependency order
//! - **Reporter**: renders the outcome as one reply
//! - **Ports**: the traits the platform and AI adapters implement

/// Error taxonomy shared by every crate in the workspace
pub mod errors;
/// Structure Generator
pub mod generator;
/// Blueprint, guild and report types
pub mod models;
/// End-to-end `/setup` flow
pub mod pipeline;
/// Collaborator traits and their mocks
pub mod ports;
/// Prompt templates and prompt policy
pub mod prompt;
/// Recreation Executor
pub mod recreation;
/// Result Reporter
pub mod reporter;
/// Teardown Executor
pub mod teardown;
/// Schema Validator
pub mod validator;
