//! Shared foundation types: canvas geometry and the crate error type.

/// Canvas dimensions and point geometry.
pub mod core;
/// Crate error and result types.
pub mod error;
