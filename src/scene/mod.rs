//! SVG overlay emission for planning artifacts.
//!
//! The writer consumes the external planner's outputs (solution path and a
//! visited-edge stream) and overlays them on the source raster.

/// Incremental SVG document writer and styling.
pub mod svg;
/// Planner-facing data types and the graph-walk callback trait.
pub mod visit;
