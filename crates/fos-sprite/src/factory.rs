//! Backend factory
//!
//! Images never build their backend themselves. Every constructor hands the
//! source bitmap, the region to use and the flags to an `ImageFactory`.

use crate::{Bitmap, ImageData, ImageFlags, Result};

/// Rectangular region of a bitmap, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// The whole bitmap
    pub fn full(bitmap: &Bitmap) -> Self {
        Self::new(0, 0, bitmap.width(), bitmap.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check that the region lies inside a `width` x `height` bitmap
    pub fn within(&self, width: u32, height: u32) -> bool {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        matches!((right, bottom), (Some(r), Some(b)) if r <= width && b <= height)
    }
}

/// Creates backend image data for a bitmap region.
///
/// Implementations must either return a usable backend or an error; the
/// returned data reports `region.width` x `region.height` as its size.
pub trait ImageFactory {
    fn create_image(
        &self,
        source: &Bitmap,
        region: Region,
        flags: ImageFlags,
    ) -> Result<Box<dyn ImageData>>;
}
