//! ImageData - backend side of an image

use crate::{AlphaMode, Bitmap, Color, ZPos};

/// Corner of a quad
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f64, y: f64, color: Color) -> Self {
        Self { x, y, color }
    }
}

/// Four corners of a drawn image.
///
/// Corners are ordered as they appear on the unrotated image: top-left,
/// top-right, bottom-left, bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quad {
    pub corners: [Vertex; 4],
}

impl Quad {
    pub const fn new(top_left: Vertex, top_right: Vertex, bottom_left: Vertex, bottom_right: Vertex) -> Self {
        Self {
            corners: [top_left, top_right, bottom_left, bottom_right],
        }
    }

    /// Axis-aligned quad spanning (x1, y1) to (x2, y2)
    pub fn axis_aligned(x1: f64, y1: f64, x2: f64, y2: f64, colors: [Color; 4]) -> Self {
        Self::new(
            Vertex::new(x1, y1, colors[0]),
            Vertex::new(x2, y1, colors[1]),
            Vertex::new(x1, y2, colors[2]),
            Vertex::new(x2, y2, colors[3]),
        )
    }

    pub fn top_left(&self) -> Vertex {
        self.corners[0]
    }

    pub fn top_right(&self) -> Vertex {
        self.corners[1]
    }

    pub fn bottom_left(&self) -> Vertex {
        self.corners[2]
    }

    pub fn bottom_right(&self) -> Vertex {
        self.corners[3]
    }

    pub fn colors(&self) -> [Color; 4] {
        self.corners.map(|v| v.color)
    }
}

/// Backend that owns an image's pixels and composes it into the target.
///
/// Drawing takes `&self`: backends queue or issue quads through whatever
/// shared rendering state they own.
pub trait ImageData {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn draw(&self, quad: &Quad, z: ZPos, mode: AlphaMode);

    /// Copy of the pixels held by the backend
    fn to_bitmap(&self) -> Bitmap;
}
