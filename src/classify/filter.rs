use rayon::prelude::*;

use crate::classify::matcher::ColorMatcher;
use crate::foundation::error::{PlanviewError, PlanviewResult};
use crate::raster::Raster;

/// Default per-channel match tolerance.
pub const DEFAULT_TOLERANCE: u8 = 15;

/// Default near-white cutoff: a pixel with every channel strictly above this
/// value is treated as obstacle regardless of the matcher list.
pub const DEFAULT_WHITE_THRESHOLD: u8 = 250;

/// Tuning knobs for [`classify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Per-channel tolerance shared by all matchers.
    pub tolerance: u8,
    /// Near-white cutoff (strict `>` on every channel). Deliberately separate
    /// from the matcher tolerance: the whiteness rule is a one-sided cutoff,
    /// not a band around a reference color.
    pub white_threshold: u8,
    /// Overwrite each pixel in place with the classification result:
    /// (0,0,0) for obstacle, (255,255,255) for free. Destructive; intended
    /// for visual inspection of the filter.
    pub recolor: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            recolor: false,
        }
    }
}

/// Row-major traversability map produced by [`classify`].
///
/// `true` means blocked. The cell for pixel `(x, y)` lives at index
/// `y * width + x`; the length is fixed at `width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObstacleGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl ObstacleGrid {
    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the grid has no cells. Never the case for grids produced by
    /// [`classify`], which rejects empty rasters.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the cell at `(x, y)` is impassable. Panics on out-of-bounds
    /// coordinates, which is a caller-contract violation.
    pub fn is_blocked(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "cell out of bounds");
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Borrow the raw row-major cells.
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }
}

/// Scan every pixel of `raster` and build the obstacle grid.
///
/// A pixel is an obstacle when all three channels exceed
/// `opts.white_threshold`, or when any matcher matches it under
/// `opts.tolerance` (first match wins; the result does not depend on matcher
/// order). With `opts.recolor` set, each pixel is additionally overwritten
/// in place with its classification — classification always uses the
/// originally sampled values, so the grid is unaffected by the overwrite.
///
/// Rows are classified in parallel; every pixel is independent and the
/// recolor writes only to the pixel just classified.
#[tracing::instrument(skip(raster, matchers), fields(width = raster.width(), height = raster.height()))]
pub fn classify(
    raster: &mut Raster,
    matchers: &[ColorMatcher],
    opts: &ClassifyOptions,
) -> PlanviewResult<ObstacleGrid> {
    let width = raster.width();
    let height = raster.height();
    let row_bytes = raster.row_bytes();

    // Raster construction enforces this; re-check so a future invariant break
    // fails fast here instead of reading out of bounds mid-scan.
    if raster.as_bytes().len() != row_bytes * height as usize {
        return Err(PlanviewError::validation(
            "raster buffer length does not match dimensions",
        ));
    }

    let mut cells = vec![false; width as usize * height as usize];

    raster
        .data_mut()
        .par_chunks_exact_mut(row_bytes)
        .zip(cells.par_chunks_exact_mut(width as usize))
        .for_each(|(row, grid_row)| {
            for (px, cell) in row.chunks_exact_mut(3).zip(grid_row.iter_mut()) {
                let (r, g, b) = (px[0], px[1], px[2]);
                let blocked = (r > opts.white_threshold
                    && g > opts.white_threshold
                    && b > opts.white_threshold)
                    || matchers.iter().any(|m| m.matches(r, g, b, opts.tolerance));
                *cell = blocked;
                if opts.recolor {
                    let v = if blocked { 0 } else { 255 };
                    px.copy_from_slice(&[v, v, v]);
                }
            }
        });

    Ok(ObstacleGrid {
        width,
        height,
        cells,
    })
}
