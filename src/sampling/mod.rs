//! Rarity-weighted random selection.

/// Inverse-CDF weighted sampler.
pub mod weighted;
