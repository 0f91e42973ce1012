//! Bitmap - RGBA pixel grid used as the source for images

use crate::{Color, Region, Result, SpriteError};

/// Pixel grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// Create a transparent bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// Create a bitmap with every pixel set to `color`
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Create from raw RGBA bytes (4 per pixel, row-major)
    pub fn from_rgba(data: &[u8], width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(SpriteError::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }

        let pixels = data
            .chunks_exact(4)
            .map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
            .collect();

        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Set pixel at (x, y); out-of-range writes are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Copy a sub-region into a new bitmap
    pub fn region(&self, region: Region) -> Result<Bitmap> {
        if !region.within(self.width, self.height) {
            return Err(SpriteError::RegionOutOfBounds {
                region,
                width: self.width,
                height: self.height,
            });
        }

        let mut pixels = Vec::with_capacity(region.width as usize * region.height as usize);
        for y in region.y..region.y + region.height {
            let start = self.index(region.x, y);
            pixels.extend_from_slice(&self.pixels[start..start + region.width as usize]);
        }

        Ok(Bitmap {
            width: region.width,
            height: region.height,
            pixels,
        })
    }

    /// Pixel data as raw bytes (RGBA)
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
