use crate::foundation::error::{PlanviewError, PlanviewResult};

pub use kurbo::Point;

/// Output canvas dimensions in pixels.
///
/// The scene writer maps planner coordinates 1:1 onto this canvas, so it is
/// always sized to the source raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> PlanviewResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlanviewError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered by the canvas.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}
