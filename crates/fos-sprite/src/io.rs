//! Image file loading
//!
//! Supports PNG, JPEG, GIF, WebP via the image crate.

use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::{Bitmap, Result, SpriteError};

/// Load an image file into a bitmap.
///
/// Missing files and undecodable data are reported as `SpriteError::Image`
/// carrying the image crate's error unchanged.
pub fn load_image_file(path: impl AsRef<Path>) -> Result<Bitmap> {
    let path = path.as_ref();
    let img = image::open(path)?;
    let bitmap = to_bitmap(img)?;

    tracing::debug!(
        "Loaded {} ({}x{})",
        path.display(),
        bitmap.width(),
        bitmap.height()
    );
    Ok(bitmap)
}

/// Decode an in-memory image, guessing the format from its magic bytes
pub fn load_image_bytes(data: &[u8]) -> Result<Bitmap> {
    let img = image::load_from_memory(data)?;
    to_bitmap(img)
}

/// Save a bitmap; the format follows the file extension
pub fn save_image_file(bitmap: &Bitmap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let expected = bitmap.width() as usize * bitmap.height() as usize * 4;
    let rgba = bitmap.to_rgba();
    let actual = rgba.len();

    let img = RgbaImage::from_raw(bitmap.width(), bitmap.height(), rgba)
        .ok_or(SpriteError::InvalidDataLength { expected, actual })?;
    img.save(path)?;

    tracing::debug!("Saved {}", path.display());
    Ok(())
}

fn to_bitmap(img: DynamicImage) -> Result<Bitmap> {
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    Bitmap::from_rgba(rgba.as_raw(), width, height)
}
