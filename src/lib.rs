//! Planview turns a raster map into a planner-ready obstacle grid and renders
//! planning artifacts back onto an SVG overlay of the original image.
//!
//! It is the environment-adapter layer between an image file and an external
//! path planner:
//!
//! 1. **Decode**: `raster::codec::decode` normalizes any supported image to an
//!    RGB8 [`Raster`].
//! 2. **Classify**: [`classify`] scans every pixel against a near-white rule
//!    plus an [`ObstaclePalette`] of reference colors and produces a row-major
//!    [`ObstacleGrid`] (`true` = blocked), optionally recoloring the raster in
//!    place for inspection.
//! 3. **Plan** (external): the planner consumes the grid plus start/goal and
//!    produces a [`SolutionPath`] and a search graph it can walk through a
//!    [`GraphVisitor`].
//! 4. **Render**: [`SvgSceneWriter`] emits the overlay document — header,
//!    background image reference, solution poly-line, capped visited-edge
//!    stream, footer — in strict order.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: classification is a pure function of raster, palette
//!   and options; rows are scanned in parallel but pixels are independent.
//! - **Bounded output**: visited edges are capped (default 10,000 per
//!   document) and excess edges are dropped silently, not an error.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod classify;
mod foundation;
mod scene;

/// Raster buffer and file codec.
pub mod raster;

pub use classify::filter::{
    ClassifyOptions, DEFAULT_TOLERANCE, DEFAULT_WHITE_THRESHOLD, ObstacleGrid, classify,
};
pub use classify::matcher::ColorMatcher;
pub use classify::palette::ObstaclePalette;
pub use foundation::core::{Canvas, Point};
pub use foundation::error::{PlanviewError, PlanviewResult};
pub use raster::Raster;
pub use scene::svg::{DEFAULT_EDGE_CAP, SceneStyle, SceneVisitor, SvgSceneWriter};
pub use scene::visit::{GraphEdge, GraphVisitor, SolutionPath};
