use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::decode::{PreparedImage, decode_image},
    catalog::layers::LayerCatalog,
    foundation::{
        core::Canvas,
        error::{TraitmintError, TraitmintResult},
    },
};

/// Decoded layer rasters keyed by layer name.
///
/// Preparation front-loads file IO and size checks so compositing only blends pixels.
#[derive(Clone, Debug)]
pub struct LayerAssetStore {
    root: PathBuf,
    canvas: Canvas,
    images: HashMap<String, PreparedImage>,
}

impl LayerAssetStore {
    /// Load every layer referenced by `catalog` from `root`.
    pub fn prepare(
        catalog: &LayerCatalog,
        root: impl Into<PathBuf>,
        canvas: Canvas,
    ) -> TraitmintResult<Self> {
        Self::prepare_layers(catalog.layer_names(), root, canvas)
    }

    /// Load the named layers from `root`.
    pub fn prepare_layers<'a>(
        names: impl IntoIterator<Item = &'a str>,
        root: impl Into<PathBuf>,
        canvas: Canvas,
    ) -> TraitmintResult<Self> {
        canvas.validate()?;
        let mut out = Self {
            root: root.into(),
            canvas,
            images: HashMap::new(),
        };

        for name in names {
            if out.images.contains_key(name) {
                continue;
            }
            let norm = normalize_rel_path(name)?;
            let bytes = out.read_bytes(&norm)?;
            let image = decode_image(&bytes)
                .map_err(|e| TraitmintError::validation(format!("layer '{name}': {e}")))?;
            if image.width != canvas.width || image.height != canvas.height {
                return Err(TraitmintError::validation(format!(
                    "layer '{name}' is {}x{}, expected canvas {}x{}",
                    image.width, image.height, canvas.width, canvas.height
                )));
            }
            out.images.insert(name.to_string(), image);
        }

        tracing::debug!(layers = out.images.len(), root = %out.root.display(), "prepared layer assets");
        Ok(out)
    }

    /// Decoded raster for `name`.
    pub fn get(&self, name: &str) -> TraitmintResult<&PreparedImage> {
        self.images.get(name).ok_or_else(|| {
            TraitmintError::validation(format!("layer asset '{name}' was not prepared"))
        })
    }

    /// Canvas every prepared layer matches.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Asset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of prepared layers.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// `true` when nothing was prepared.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn read_bytes(&self, norm_path: &str) -> TraitmintResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read layer asset from '{}'", path.display()))
            .map_err(TraitmintError::from)
    }
}

/// Check that every layer named in `catalog` has an asset file under `root`.
///
/// This does not decode anything; it only catches missing files and unsafe names before
/// any output is written.
pub fn verify_assets(catalog: &LayerCatalog, root: &Path) -> TraitmintResult<()> {
    let mut missing = Vec::new();
    for name in catalog.layer_names() {
        let norm = normalize_rel_path(name)?;
        if !root.join(Path::new(&norm)).is_file() {
            missing.push(name);
        }
    }
    if !missing.is_empty() {
        return Err(TraitmintError::validation(format!(
            "missing layer assets under '{}': {}",
            root.display(),
            missing.join(", ")
        )));
    }
    Ok(())
}

/// Turn a layer name into a relative path under the asset root, joined with `/`.
///
/// Backslashes count as separators. Empty and `.` segments are dropped; absolute names
/// and `..` segments are rejected so a trait table cannot reach outside the asset root.
pub fn normalize_rel_path(layer_name: &str) -> TraitmintResult<String> {
    let unified = layer_name.replace('\\', "/");
    if unified.starts_with('/') {
        return Err(TraitmintError::validation(format!(
            "layer '{layer_name}' must be a relative path"
        )));
    }

    let segments = unified
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .map(|seg| match seg {
            ".." => Err(TraitmintError::validation(format!(
                "layer '{layer_name}' must not contain '..'"
            ))),
            _ => Ok(seg),
        })
        .collect::<TraitmintResult<Vec<_>>>()?;

    if segments.is_empty() {
        return Err(TraitmintError::validation(format!(
            "layer '{layer_name}' does not name a file"
        )));
    }
    Ok(segments.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
