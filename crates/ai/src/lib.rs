//! OpenAI adapters for the guildforge ports.
//!
//! [`client::OpenAiClient`] implements both [`guildforge_core::ports::TextGenerator`]
//! and [`guildforge_core::ports::ImageGenerator`]. The [`icon`] module turns a
//! generated image into an upload-ready server icon.

pub mod client;
pub mod icon;

pub use client::{OpenAiClient, OpenAiSettings};
pub use icon::{ICON_FILENAME, ICON_SIZE, generate_icon, resize_icon};
