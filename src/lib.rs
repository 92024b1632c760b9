//! traitmint generates batches of unique layered images and their attribute metadata.
//!
//! A trait table assigns every image layer to a group, a z-order and a rarity weight. One
//! batch draws one layer per group, rejects any combination that was already produced,
//! composites the chosen layers bottom to top and writes an indexed PNG plus a JSON
//! metadata record for each result.
//!
//! # Pipeline overview
//!
//! 1. **Catalog**: `trait table -> LayerCatalog` (lookups by layer name and by group)
//! 2. **Generate**: `LayerCatalog + seed -> Vec<Combination>` (weighted, unique, z-sorted)
//! 3. **Describe**: `Combination -> MetadataRecord`
//! 4. **Composite**: `Combination + LayerAssetStore -> <n>.png`
//!
//! Generation is sequential and deterministic for a given seed. Steps 3 and 4 are
//! independent per combination and may run on a rayon pool.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod catalog;
mod config;
mod foundation;
mod generate;
mod metadata;
mod pipeline;
mod render;
mod sampling;

pub use assets::decode::{PreparedImage, decode_image, save_png};
pub use assets::listing::{list_assets, write_asset_list};
pub use assets::store::{LayerAssetStore, normalize_rel_path, verify_assets};
pub use catalog::layers::{
    GroupEntry, LayerAttrs, LayerCatalog, TraitGroup, build_by_group, build_by_name,
};
pub use catalog::row::{TraitRow, read_rows};
pub use config::mint::MintConfig;
pub use foundation::core::{Canvas, ImageNumber};
pub use foundation::error::{TraitmintError, TraitmintResult};
pub use generate::combination::{Combination, CombinationKey, SelectedLayer, generate};
pub use metadata::record::{Attribute, MetadataRecord, MetadataTemplate, build_metadata};
pub use metadata::writer::{metadata_path, to_pretty_json, write_metadata};
pub use pipeline::batch::{
    BatchStats, BatchThreading, CatalogReport, OutputDirs, check_batch, load_catalog, run_batch,
    write_outputs,
};
pub use render::composite::{Rgba8, over, over_in_place};
pub use render::compositor::{
    ComposedImage, composite, composite_prepared, image_path, render_combination,
};
pub use sampling::weighted::{WeightedSampler, weighted_choice};
