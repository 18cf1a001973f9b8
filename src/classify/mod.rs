//! Color-based obstacle classification: raster in, boolean grid out.

/// The classification scan and its options.
pub mod filter;
/// Single-color match predicate.
pub mod matcher;
/// Serializable obstacle color configuration.
pub mod palette;
