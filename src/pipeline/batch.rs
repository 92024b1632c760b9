use std::path::Path;

use anyhow::Context;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::{
    assets::store::{LayerAssetStore, verify_assets},
    catalog::layers::LayerCatalog,
    config::mint::MintConfig,
    foundation::{
        core::ImageNumber,
        error::{TraitmintError, TraitmintResult},
    },
    generate::combination::{Combination, generate},
    metadata::{
        record::{MetadataTemplate, build_metadata},
        writer::write_metadata,
    },
    render::compositor::composite_prepared,
};

/// Threading controls for the per-combination output stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchThreading {
    /// Write outputs on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl BatchThreading {
    /// Threading settings carried by `cfg`.
    pub fn from_config(cfg: &MintConfig) -> Self {
        Self {
            parallel: cfg.parallel,
            threads: cfg.threads,
        }
    }
}

/// Counters reported by a finished batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Unique combinations generated.
    pub combinations: u64,
    /// Image files written.
    pub images_written: u64,
    /// Metadata files written.
    pub metadata_written: u64,
    /// Seed the combinations were drawn with.
    pub seed: u64,
}

/// Summary of a validated catalog, without writing anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogReport {
    /// `(group name, candidate count)` in trait table order.
    pub groups: Vec<(String, usize)>,
    /// Distinct layer names.
    pub layers: usize,
    /// Distinct achievable combinations.
    pub combination_space: u128,
    /// Requested batch size.
    pub requested: usize,
}

impl CatalogReport {
    /// Whether the requested batch fits the combination space.
    pub fn fits(&self) -> bool {
        self.requested as u128 <= self.combination_space
    }
}

/// Parse and validate the trait table named by `cfg`.
pub fn load_catalog(cfg: &MintConfig) -> TraitmintResult<LayerCatalog> {
    let catalog = LayerCatalog::from_tsv_path(cfg.trait_table_path(), cfg.has_header)?;
    catalog.validate()?;
    Ok(catalog)
}

/// Validate the catalog and asset files of `cfg` and summarize them.
pub fn check_batch(cfg: &MintConfig) -> TraitmintResult<CatalogReport> {
    cfg.validate()?;
    let catalog = load_catalog(cfg)?;
    verify_assets(&catalog, &cfg.asset_dir_path())?;
    LayerAssetStore::prepare(&catalog, cfg.asset_dir_path(), cfg.canvas)?;

    Ok(CatalogReport {
        groups: catalog
            .groups()
            .iter()
            .map(|g| (g.name.clone(), g.entries.len()))
            .collect(),
        layers: catalog.len(),
        combination_space: catalog.combination_space(),
        requested: cfg.count,
    })
}

/// Run one full minting batch.
///
/// Every configuration check (trait table, asset files and sizes, combination space)
/// happens before the first output file is written.
#[tracing::instrument(skip(cfg, threading), fields(count = cfg.count))]
pub fn run_batch(cfg: &MintConfig, threading: &BatchThreading) -> TraitmintResult<BatchStats> {
    cfg.validate()?;
    let catalog = load_catalog(cfg)?;
    let asset_dir = cfg.asset_dir_path();
    verify_assets(&catalog, &asset_dir)?;
    let assets = LayerAssetStore::prepare(&catalog, &asset_dir, cfg.canvas)?;

    let seed = cfg.seed.unwrap_or_else(rand::random::<u64>);
    tracing::info!(seed, groups = catalog.groups().len(), "generating combinations");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let combinations = generate(&catalog, cfg.count, &mut rng)?;

    let image_dir = cfg.image_dir_path();
    let metadata_dir = cfg.metadata_dir_path();
    for dir in [&image_dir, &metadata_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
    }

    let mut stats = write_outputs(
        &combinations,
        &catalog,
        &assets,
        &cfg.collection,
        OutputDirs {
            images: &image_dir,
            metadata: &metadata_dir,
        },
        threading,
    )?;
    stats.seed = seed;

    tracing::info!(
        combinations = stats.combinations,
        images = stats.images_written,
        metadata = stats.metadata_written,
        "batch finished"
    );
    Ok(stats)
}

/// Destination directories for one batch.
#[derive(Clone, Copy, Debug)]
pub struct OutputDirs<'a> {
    /// Where `<n>.png` goes.
    pub images: &'a Path,
    /// Where `<n>.json` goes.
    pub metadata: &'a Path,
}

/// Write metadata and image files for every combination, numbered from 1.
///
/// Output directories must already exist.
pub fn write_outputs(
    combinations: &[Combination],
    catalog: &LayerCatalog,
    assets: &LayerAssetStore,
    template: &MetadataTemplate,
    dirs: OutputDirs<'_>,
    threading: &BatchThreading,
) -> TraitmintResult<BatchStats> {
    let write_one = |idx: usize, combination: &Combination| -> TraitmintResult<()> {
        let n = ImageNumber::from_index(idx);
        let record = build_metadata(combination, catalog, n, template)?;
        write_metadata(&record, dirs.metadata)?;
        composite_prepared(combination, assets, dirs.images, n)?;
        Ok(())
    };

    if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            combinations
                .par_iter()
                .enumerate()
                .try_for_each(|(idx, c)| write_one(idx, c))
        })?;
    } else {
        for (idx, c) in combinations.iter().enumerate() {
            write_one(idx, c)?;
        }
    }

    let n = combinations.len() as u64;
    Ok(BatchStats {
        combinations: n,
        images_written: n,
        metadata_written: n,
        seed: 0,
    })
}

fn build_thread_pool(threads: Option<usize>) -> TraitmintResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TraitmintError::validation(
            "batch threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TraitmintError::generation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/batch.rs"]
mod tests;
