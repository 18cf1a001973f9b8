use std::path::Path;

use crate::foundation::error::{PlanviewError, PlanviewResult};
use crate::raster::Raster;

/// Decode an image file into an RGB8 [`Raster`].
///
/// Palette, 16-bit and alpha-carrying inputs are normalized to 8-bit
/// three-channel RGB before the classifier sees them. Missing, unreadable
/// and unparseable files all surface as [`PlanviewError::Decode`].
pub fn decode(path: &Path) -> PlanviewResult<Raster> {
    let bytes = std::fs::read(path)
        .map_err(|e| PlanviewError::decode(format!("{}: {e}", path.display())))?;
    decode_bytes(&bytes)
        .map_err(|e| PlanviewError::decode(format!("{}: {e}", path.display())))
}

/// Decode in-memory image bytes into an RGB8 [`Raster`].
pub fn decode_bytes(bytes: &[u8]) -> PlanviewResult<Raster> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PlanviewError::decode(e.to_string()))?;
    let rgb = dyn_img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Raster::from_rgb8(width, height, rgb.into_raw())
}

/// Encode a raster to an image file; the format follows the path extension
/// (the original pipeline writes PNG).
pub fn encode(raster: &Raster, path: &Path) -> PlanviewResult<()> {
    let img = image::RgbImage::from_raw(
        raster.width(),
        raster.height(),
        raster.as_bytes().to_vec(),
    )
    .ok_or_else(|| PlanviewError::encode("raster buffer does not match dimensions"))?;
    img.save(path)
        .map_err(|e| PlanviewError::encode(format!("{}: {e}", path.display())))
}
