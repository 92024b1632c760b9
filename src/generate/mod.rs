//! Unique combination generation.

/// Combination types and the rejection-sampling generator.
pub mod combination;
