//! Attribute metadata derived from generated combinations.

/// Metadata record construction.
pub mod record;
/// JSON output of metadata records.
pub mod writer;
