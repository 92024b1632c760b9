use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use crate::{
    foundation::{
        core::Canvas,
        error::{TraitmintError, TraitmintResult},
    },
    metadata::record::MetadataTemplate,
};

/// Run configuration for one minting batch.
///
/// Relative paths are resolved against [`MintConfig::base_dir`], which is the directory of
/// the config file when loaded with [`MintConfig::from_path`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MintConfig {
    /// Tab-delimited trait table.
    pub trait_table: PathBuf,
    /// Whether the trait table starts with a header row.
    pub has_header: bool,
    /// Directory holding one raster per layer name.
    pub asset_dir: PathBuf,
    /// Output directory for `<n>.png`.
    pub image_dir: PathBuf,
    /// Output directory for `<n>.json`.
    pub metadata_dir: PathBuf,
    /// Number of unique assets to mint.
    pub count: usize,
    /// RNG seed; `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
    /// Size every asset and output image shares.
    pub canvas: Canvas,
    /// Strings metadata records are formatted from.
    pub collection: MetadataTemplate,
    /// Render images and metadata on a rayon pool.
    pub parallel: bool,
    /// Worker thread override for parallel mode.
    pub threads: Option<usize>,
    #[serde(skip)]
    pub(crate) base_dir: PathBuf,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            trait_table: PathBuf::from("data/layer_metadata.tsv"),
            has_header: true,
            asset_dir: PathBuf::from("assets"),
            image_dir: PathBuf::from("output/images"),
            metadata_dir: PathBuf::from("output/metadata"),
            count: 10,
            seed: None,
            canvas: Canvas::default(),
            collection: MetadataTemplate::default(),
            parallel: false,
            threads: None,
            base_dir: PathBuf::from("."),
        }
    }
}

impl MintConfig {
    /// Load a JSON config; relative paths resolve against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> TraitmintResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TraitmintError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        cfg.base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        Ok(cfg)
    }

    /// Parse JSON config from `reader`. Relative paths resolve against `.`.
    pub fn from_reader<R: Read>(reader: R) -> TraitmintResult<Self> {
        let mut cfg: Self = serde_json::from_reader(reader)
            .map_err(|e| TraitmintError::serde(format!("parse config JSON: {e}")))?;
        cfg.base_dir = PathBuf::from(".");
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replace the directory relative paths resolve against.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Directory relative paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Reject settings no run could satisfy.
    pub fn validate(&self) -> TraitmintResult<()> {
        self.canvas.validate()?;
        if self.threads == Some(0) {
            return Err(TraitmintError::validation(
                "config 'threads' must be >= 1 when set",
            ));
        }
        if self.collection.image_extension.is_empty() {
            return Err(TraitmintError::validation(
                "config 'collection.image_extension' must be non-empty",
            ));
        }
        Ok(())
    }

    /// Absolute or base-relative trait table path.
    pub fn trait_table_path(&self) -> PathBuf {
        self.resolve(&self.trait_table)
    }

    /// Absolute or base-relative asset directory.
    pub fn asset_dir_path(&self) -> PathBuf {
        self.resolve(&self.asset_dir)
    }

    /// Absolute or base-relative image output directory.
    pub fn image_dir_path(&self) -> PathBuf {
        self.resolve(&self.image_dir)
    }

    /// Absolute or base-relative metadata output directory.
    pub fn metadata_dir_path(&self) -> PathBuf {
        self.resolve(&self.metadata_dir)
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mint.rs"]
mod tests;
