//! fOS Sprite - Drawable Images
//!
//! Images built from bitmaps or image files, tile slicing, and quad drawing
//! delegated to a pluggable image-data backend.
//!
//! This crate provides:
//! - `Image`, an owning handle around a backend `ImageData`
//! - `load_tiles` for slicing a bitmap into a grid of images
//! - `Bitmap` pixel grids and file loading via the image crate
//! - A CPU reference backend that paints queued quads with tiny-skia

mod color;
mod flags;
pub mod bitmap;
pub mod factory;
pub mod image;
pub mod image_data;
pub mod io;
pub mod math;
pub mod software;
pub mod tiles;

pub use bitmap::Bitmap;
pub use color::{AlphaMode, Color};
pub use factory::{ImageFactory, Region};
pub use flags::ImageFlags;
pub use self::image::Image;
pub use image_data::{ImageData, Quad, Vertex};
pub use io::{load_image_bytes, load_image_file, save_image_file};
pub use software::{BackendConfig, DrawCall, DrawQueue, SoftwareBackend, SoftwareImageData};
pub use tiles::{load_tiles, load_tiles_from_file, TileGrid, TileSize};

#[allow(deprecated)]
pub use tiles::{load_tiles_from_file_tileable, load_tiles_tileable};

/// Draw-order key. Higher values are painted later.
pub type ZPos = f64;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SpriteError>;

/// Sprite error
#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O and decode failures from the image loader, passed through as-is
    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error("Invalid tile size: {reason}")]
    InvalidTileSize { reason: String },

    #[error("Region {region:?} lies outside a {width}x{height} bitmap")]
    RegionOutOfBounds { region: Region, width: u32, height: u32 },

    #[error("Region {0:?} is empty")]
    EmptyRegion(Region),

    #[error("Invalid data length: expected {expected}, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },
}
