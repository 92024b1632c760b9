use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{TraitmintError, TraitmintResult},
};

/// Decoded raster layer in straight-alpha RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major RGBA8.
    pub rgba8: Vec<u8>,
}

/// Decode encoded image bytes into RGBA8, whatever the source colour type.
pub fn decode_image(bytes: &[u8]) -> TraitmintResult<PreparedImage> {
    let rgba = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PreparedImage {
        width,
        height,
        rgba8: rgba.into_raw(),
    })
}

/// Encode straight-alpha RGBA8 as PNG at `path`, replacing any existing file.
pub fn save_png(
    path: &std::path::Path,
    width: u32,
    height: u32,
    rgba8: &[u8],
) -> TraitmintResult<()> {
    let expected = Canvas { width, height }.rgba8_len()?;
    if rgba8.len() != expected {
        return Err(TraitmintError::validation(format!(
            "pixel buffer of {} bytes does not match {width}x{height}",
            rgba8.len()
        )));
    }

    image::save_buffer_with_format(
        path,
        rgba8,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
