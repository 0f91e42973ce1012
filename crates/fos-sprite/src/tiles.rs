//! Tile slicing
//!
//! Cuts a bitmap into a grid of equally sized images. Leftover pixels on the
//! right and bottom that do not make up a whole tile are dropped.

use std::path::Path;

use crate::{io, Bitmap, Image, ImageFactory, ImageFlags, Region, Result, SpriteError};

/// Size of the tiles along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSize {
    /// Width or height of a tile in pixels
    Pixels(u32),
    /// Number of tiles; their size is derived from the bitmap
    Count(u32),
}

impl TileSize {
    /// Legacy sign convention: positive values are pixel sizes, everything
    /// else is a negated tile count.
    pub fn from_legacy(value: i32) -> Self {
        if value > 0 {
            Self::Pixels(value.unsigned_abs())
        } else {
            Self::Count(value.unsigned_abs())
        }
    }

    /// Resolve to (tile count, tile size in pixels) along an axis of `extent` pixels
    fn resolve(self, extent: u32, axis: &str) -> Result<(u32, u32)> {
        match self {
            Self::Pixels(0) | Self::Count(0) => Err(SpriteError::InvalidTileSize {
                reason: format!("tile {axis} must not be zero"),
            }),
            Self::Pixels(size) => Ok((extent / size, size)),
            Self::Count(count) => {
                let size = extent / count;
                if size == 0 {
                    return Err(SpriteError::InvalidTileSize {
                        reason: format!("{count} tiles do not fit into {extent} pixels of {axis}"),
                    });
                }
                Ok((count, size))
            }
        }
    }
}

/// Resolved tile grid over a bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl TileGrid {
    pub fn new(width: u32, height: u32, tile_width: TileSize, tile_height: TileSize) -> Result<Self> {
        let (tiles_x, tile_width) = tile_width.resolve(width, "width")?;
        let (tiles_y, tile_height) = tile_height.resolve(height, "height")?;
        Ok(Self {
            tiles_x,
            tiles_y,
            tile_width,
            tile_height,
        })
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles_x as usize * self.tiles_y as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tile regions, row by row, left to right
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        (0..self.tiles_y).flat_map(move |row| {
            (0..self.tiles_x).map(move |col| {
                Region::new(
                    col * self.tile_width,
                    row * self.tile_height,
                    self.tile_width,
                    self.tile_height,
                )
            })
        })
    }
}

/// Slice `bitmap` into tiles. The tile in row `row` and column `col` is at
/// index `row * tiles_x + col`.
pub fn load_tiles(
    factory: &dyn ImageFactory,
    bitmap: &Bitmap,
    tile_width: TileSize,
    tile_height: TileSize,
    flags: ImageFlags,
) -> Result<Vec<Image>> {
    let grid = TileGrid::new(bitmap.width(), bitmap.height(), tile_width, tile_height)?;

    tracing::debug!(
        "Slicing {}x{} bitmap into {}x{} tiles of {}x{}",
        bitmap.width(),
        bitmap.height(),
        grid.tiles_x,
        grid.tiles_y,
        grid.tile_width,
        grid.tile_height
    );

    grid.regions()
        .map(|region| Image::from_bitmap_region(factory, bitmap, region, flags))
        .collect()
}

/// Load an image file and slice it into tiles
pub fn load_tiles_from_file(
    factory: &dyn ImageFactory,
    path: impl AsRef<Path>,
    tile_width: TileSize,
    tile_height: TileSize,
    flags: ImageFlags,
) -> Result<Vec<Image>> {
    let bitmap = io::load_image_file(path)?;
    load_tiles(factory, &bitmap, tile_width, tile_height, flags)
}

#[deprecated(note = "use `load_tiles` with `TileSize` and `ImageFlags`")]
pub fn load_tiles_tileable(
    factory: &dyn ImageFactory,
    bitmap: &Bitmap,
    tile_width: i32,
    tile_height: i32,
    tileable: bool,
) -> Result<Vec<Image>> {
    load_tiles(
        factory,
        bitmap,
        TileSize::from_legacy(tile_width),
        TileSize::from_legacy(tile_height),
        ImageFlags::from(tileable),
    )
}

#[deprecated(note = "use `load_tiles_from_file` with `TileSize` and `ImageFlags`")]
pub fn load_tiles_from_file_tileable(
    factory: &dyn ImageFactory,
    path: impl AsRef<Path>,
    tile_width: i32,
    tile_height: i32,
    tileable: bool,
) -> Result<Vec<Image>> {
    load_tiles_from_file(
        factory,
        path,
        TileSize::from_legacy(tile_width),
        TileSize::from_legacy(tile_height),
        ImageFlags::from(tileable),
    )
}
