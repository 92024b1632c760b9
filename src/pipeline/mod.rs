//! Batch driver tying catalog, generation, metadata and compositing together.

/// One minting run.
pub mod batch;
