//! Trait table parsing and the derived layer lookups.

/// Layer catalog: lookups by layer name and by trait group.
pub mod layers;
/// Tab-delimited trait table rows.
pub mod row;
