//! Server icon generation.

use std::io::Cursor;

use guildforge_core::errors::{GuildError, GuildResult};
use guildforge_core::ports::ImageGenerator;
use guildforge_core::prompt::icon_prompt;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::{info, instrument};

/// Edge length of the square icon sent back to the user.
pub const ICON_SIZE: u32 = 512;

/// Attachment name for the generated icon.
pub const ICON_FILENAME: &str = "server_icon.png";

/// Generate a themed icon and return it as PNG bytes.
///
/// The image is requested from `generator`, downloaded, and scaled to
/// [`ICON_SIZE`] square. Any step failing aborts the whole operation.
#[instrument(skip(generator))]
pub async fn generate_icon(
    generator: &dyn ImageGenerator,
    theme: &str,
    max_theme_chars: usize,
) -> GuildResult<Vec<u8>> {
    let prompt = icon_prompt(theme, max_theme_chars);
    let url = generator.generate_image(prompt).await?;
    info!("Image generated, downloading");

    let raw = generator.download(url).await?;
    let png = resize_icon(&raw)?;
    info!(bytes = png.len(), "Icon ready");
    Ok(png)
}

/// Decode any supported image, convert it to RGBA and re-encode it as a
/// [`ICON_SIZE`] square PNG.
pub fn resize_icon(raw: &[u8]) -> GuildResult<Vec<u8>> {
    let decoded = image::load_from_memory(raw)
        .map_err(|e| GuildError::Image(format!("could not decode image: {}", e)))?;

    let rgba = DynamicImage::ImageRgba8(decoded.to_rgba8());
    let resized = rgba.resize_exact(ICON_SIZE, ICON_SIZE, FilterType::CatmullRom);

    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| GuildError::Image(format!("could not encode PNG: {}", e)))?;
    Ok(out.into_inner())
}
