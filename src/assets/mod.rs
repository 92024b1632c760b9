//! Layer asset IO: decoding, preflight checks and directory listings.

/// Raster decode and PNG output.
pub mod decode;
/// Asset directory listing.
pub mod listing;
/// Prepared layer rasters.
pub mod store;
