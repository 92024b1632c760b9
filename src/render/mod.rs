//! Layer compositing.

/// Straight-alpha RGBA8 blend operations.
pub mod composite;
/// Combination to raster compositor.
pub mod compositor;
