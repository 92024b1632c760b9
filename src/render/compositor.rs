use std::path::{Path, PathBuf};

use crate::{
    assets::{decode::save_png, store::LayerAssetStore},
    foundation::{
        core::{Canvas, ImageNumber},
        error::TraitmintResult,
    },
    generate::combination::Combination,
    render::composite::over_in_place,
};

/// Flattened result of one combination, straight-alpha RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8.
    pub data: Vec<u8>,
}

impl ComposedImage {
    /// Encode as PNG at `path`, replacing any existing file.
    pub fn save_png(&self, path: &Path) -> TraitmintResult<()> {
        save_png(path, self.width, self.height, &self.data)
    }
}

/// Flatten the layers of `combination` onto a transparent canvas.
///
/// Layers are blended strictly in the combination's order, first layer at the bottom.
pub fn render_combination(
    combination: &Combination,
    assets: &LayerAssetStore,
) -> TraitmintResult<ComposedImage> {
    let canvas = assets.canvas();
    let mut data = vec![0u8; canvas.rgba8_len()?];
    for name in combination.layer_names() {
        let layer = assets.get(name)?;
        over_in_place(&mut data, &layer.rgba8)?;
    }
    Ok(ComposedImage {
        width: canvas.width,
        height: canvas.height,
        data,
    })
}

/// Path of the image file for `image_number` inside `output_dir`.
pub fn image_path(output_dir: &Path, image_number: ImageNumber) -> PathBuf {
    output_dir.join(format!("{image_number}.png"))
}

/// Render `combination` from prepared assets and write `<image_number>.png`.
pub fn composite_prepared(
    combination: &Combination,
    assets: &LayerAssetStore,
    output_dir: &Path,
    image_number: ImageNumber,
) -> TraitmintResult<PathBuf> {
    let image = render_combination(combination, assets)?;
    let path = image_path(output_dir, image_number);
    image.save_png(&path)?;
    tracing::debug!(path = %path.display(), layers = combination.len(), "wrote image");
    Ok(path)
}

/// Load the layers of `combination` from `asset_root`, composite them and write
/// `<image_number>.png` into `output_dir`.
pub fn composite(
    combination: &Combination,
    asset_root: &Path,
    output_dir: &Path,
    image_number: ImageNumber,
    canvas: Canvas,
) -> TraitmintResult<PathBuf> {
    let assets = LayerAssetStore::prepare_layers(combination.layer_names(), asset_root, canvas)?;
    composite_prepared(combination, &assets, output_dir, image_number)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
