//! Run configuration.

/// JSON batch configuration.
pub mod mint;
