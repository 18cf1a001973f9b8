//! RGB8 raster buffer shared by the codec and the classifier.

use crate::foundation::core::Canvas;
use crate::foundation::error::{PlanviewError, PlanviewResult};

/// File decode/encode on top of the `image` crate.
pub mod codec;

/// A decoded image: row-major RGB, 3 bytes per pixel, no alpha.
///
/// The buffer length always equals `width * height * 3`; the invariant is
/// checked at construction and the fields stay private so it cannot be broken
/// afterwards. The only mutation the crate performs is the classifier's
/// optional in-place recolor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap a row-major RGB8 buffer, validating its length against the
    /// declared dimensions.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> PlanviewResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlanviewError::validation(
                "raster width/height must be non-zero",
            ));
        }
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(PlanviewError::validation(format!(
                "raster buffer length {} does not match {width}x{height}x3 = {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canvas matching this raster 1:1.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// RGB channels of the pixel at `(x, y)`. Panics on out-of-bounds
    /// coordinates, which is a caller-contract violation.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Overwrite the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Borrow the raw row-major RGB8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes in one row.
    pub(crate) fn row_bytes(&self) -> usize {
        self.width as usize * 3
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgb8_checks_buffer_length() {
        assert!(Raster::from_rgb8(2, 2, vec![0; 12]).is_ok());
        assert!(Raster::from_rgb8(2, 2, vec![0; 11]).is_err());
        assert!(Raster::from_rgb8(0, 2, vec![]).is_err());
    }

    #[test]
    fn pixel_roundtrip_row_major() {
        let mut r = Raster::from_rgb8(3, 2, vec![0; 18]).unwrap();
        r.set_pixel(2, 1, [10, 20, 30]);
        assert_eq!(r.pixel(2, 1), [10, 20, 30]);
        // (2, 1) is the last pixel of a 3x2 raster.
        assert_eq!(&r.as_bytes()[15..18], &[10, 20, 30]);
    }
}
