//! CPU reference backend
//!
//! Image data lives in premultiplied tiny-skia pixmaps. Drawing only queues
//! the quad; `DrawQueue::flush` sorts the queue by z and paints every quad
//! onto a target pixmap.
//!
//! Each texture carries a 1 pixel border around the image. Tileable edges
//! repeat the edge pixels into the border, soft edges leave it transparent,
//! so filtered sampling fades soft edges out and keeps tileable edges hard.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, Pattern, Pixmap, PremultipliedColorU8,
    SpreadMode, Transform,
};

use crate::{
    AlphaMode, Bitmap, Color, ImageData, ImageFactory, ImageFlags, Quad, Region, Result,
    SpriteError, ZPos,
};

/// Border around every texture, in pixels
const BORDER: u32 = 1;

/// Backend configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Sampling used when images are scaled or rotated
    pub filter_quality: FilterQuality,
    /// Anti-alias quad edges
    pub anti_alias: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            filter_quality: FilterQuality::Bilinear,
            anti_alias: false,
        }
    }
}

impl BackendConfig {
    pub fn with_filter_quality(mut self, quality: FilterQuality) -> Self {
        self.filter_quality = quality;
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }
}

/// A queued quad
#[derive(Clone)]
pub struct DrawCall {
    pub quad: Quad,
    pub z: ZPos,
    pub mode: AlphaMode,
    texture: Rc<Pixmap>,
    filter: FilterQuality,
    anti_alias: bool,
}

impl fmt::Debug for DrawCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawCall")
            .field("quad", &self.quad)
            .field("z", &self.z)
            .field("mode", &self.mode)
            .field("texture", &(self.texture.width(), self.texture.height()))
            .finish()
    }
}

impl DrawCall {
    /// Paint the quad as a textured parallelogram spanned by its top-left,
    /// top-right and bottom-left corners.
    fn paint(&self, target: &mut Pixmap) {
        let width = f64::from(self.texture.width() - 2 * BORDER);
        let height = f64::from(self.texture.height() - 2 * BORDER);
        let [tl, tr, bl, br] = self.quad.corners;

        let sx = (tr.x - tl.x) / width;
        let ky = (tr.y - tl.y) / width;
        let kx = (bl.x - tl.x) / height;
        let sy = (bl.y - tl.y) / height;
        let border = f64::from(BORDER);
        let tx = tl.x - (sx + kx) * border;
        let ty = tl.y - (ky + sy) * border;
        let transform = Transform::from_row(
            sx as f32, ky as f32, kx as f32, sy as f32, tx as f32, ty as f32,
        );

        let mut pb = PathBuilder::new();
        pb.move_to(tl.x as f32, tl.y as f32);
        pb.line_to(tr.x as f32, tr.y as f32);
        pb.line_to(br.x as f32, br.y as f32);
        pb.line_to(bl.x as f32, bl.y as f32);
        pb.close();
        let Some(path) = pb.finish() else {
            return;
        };

        let colors = self.quad.colors();
        let modulated;
        let texture: &Pixmap = if colors.iter().all(|c| *c == Color::WHITE) {
            &self.texture
        } else {
            modulated = modulate(&self.texture, colors);
            &modulated
        };

        let paint = Paint {
            shader: Pattern::new(
                texture.as_ref(),
                SpreadMode::Pad,
                self.filter,
                1.0,
                transform,
            ),
            blend_mode: self.mode.blend_mode(),
            anti_alias: self.anti_alias,
            ..Paint::default()
        };

        target.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Quads waiting to be painted, shared by a backend and all its images
#[derive(Debug, Clone, Default)]
pub struct DrawQueue {
    calls: Rc<RefCell<Vec<DrawCall>>>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: DrawCall) {
        tracing::trace!("Queued quad at z={} ({:?})", call.z, call.mode);
        self.calls.borrow_mut().push(call);
    }

    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    /// Queued calls in issue order
    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Paint all queued quads onto `target`, lowest z first, and empty the
    /// queue. Quads with equal z keep their issue order.
    pub fn flush(&self, target: &mut Pixmap) -> usize {
        let mut calls = self.calls.take();
        calls.sort_by(|a, b| a.z.total_cmp(&b.z));

        for call in &calls {
            call.paint(target);
        }

        tracing::debug!("Flushed {} quads", calls.len());
        calls.len()
    }
}

/// CPU backend factory
#[derive(Debug, Clone, Default)]
pub struct SoftwareBackend {
    config: BackendConfig,
    queue: DrawQueue,
}

impl SoftwareBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            queue: DrawQueue::new(),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Queue shared by every image this backend created
    pub fn queue(&self) -> &DrawQueue {
        &self.queue
    }
}

impl ImageFactory for SoftwareBackend {
    fn create_image(
        &self,
        source: &Bitmap,
        region: Region,
        flags: ImageFlags,
    ) -> Result<Box<dyn ImageData>> {
        if !region.within(source.width(), source.height()) {
            return Err(SpriteError::RegionOutOfBounds {
                region,
                width: source.width(),
                height: source.height(),
            });
        }
        if region.is_empty() {
            return Err(SpriteError::EmptyRegion(region));
        }

        let pixels = source.region(region)?;
        let texture = bordered_texture(source, region, flags)?;
        let filter = if flags.contains(ImageFlags::RETRO) {
            FilterQuality::Nearest
        } else {
            self.config.filter_quality
        };

        tracing::debug!(
            "Created {}x{} software image (flags {:#x})",
            region.width,
            region.height,
            flags.bits()
        );

        Ok(Box::new(SoftwareImageData {
            pixels,
            texture: Rc::new(texture),
            filter,
            anti_alias: self.config.anti_alias,
            queue: self.queue.clone(),
        }))
    }
}

/// Image data created by `SoftwareBackend`.
///
/// Keeps the straight-alpha source pixels next to the premultiplied texture,
/// which is only used for painting.
pub struct SoftwareImageData {
    pixels: Bitmap,
    texture: Rc<Pixmap>,
    filter: FilterQuality,
    anti_alias: bool,
    queue: DrawQueue,
}

impl ImageData for SoftwareImageData {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn draw(&self, quad: &Quad, z: ZPos, mode: AlphaMode) {
        self.queue.push(DrawCall {
            quad: *quad,
            z,
            mode,
            texture: Rc::clone(&self.texture),
            filter: self.filter,
            anti_alias: self.anti_alias,
        });
    }

    fn to_bitmap(&self) -> Bitmap {
        self.pixels.clone()
    }
}

/// Copy `region` of `source` into a pixmap with a border on every side
fn bordered_texture(source: &Bitmap, region: Region, flags: ImageFlags) -> Result<Pixmap> {
    let tex_width = region.width.saturating_add(2 * BORDER);
    let tex_height = region.height.saturating_add(2 * BORDER);
    let mut texture = Pixmap::new(tex_width, tex_height).ok_or_else(|| {
        SpriteError::InvalidArgument(format!(
            "{}x{} image is too large for a texture",
            region.width, region.height
        ))
    })?;

    let src_x = |tx: u32| {
        edge_clamp(
            tx,
            region.width,
            flags.contains(ImageFlags::TILEABLE_LEFT),
            flags.contains(ImageFlags::TILEABLE_RIGHT),
        )
    };
    let src_y = |ty: u32| {
        edge_clamp(
            ty,
            region.height,
            flags.contains(ImageFlags::TILEABLE_TOP),
            flags.contains(ImageFlags::TILEABLE_BOTTOM),
        )
    };

    let pixels = texture.pixels_mut();
    for ty in 0..tex_height {
        for tx in 0..tex_width {
            let color = match (src_x(tx), src_y(ty)) {
                (Some(x), Some(y)) => source
                    .get_pixel(region.x + x, region.y + y)
                    .unwrap_or(Color::TRANSPARENT),
                _ => Color::TRANSPARENT,
            };
            let idx = ty as usize * tex_width as usize + tx as usize;
            pixels[idx] = tiny_skia::ColorU8::from(color).premultiply();
        }
    }

    Ok(texture)
}

/// Map a texture coordinate to a source coordinate, or `None` for a soft
/// border pixel
fn edge_clamp(t: u32, len: u32, tile_low: bool, tile_high: bool) -> Option<u32> {
    if t < BORDER {
        tile_low.then_some(0)
    } else if t - BORDER >= len {
        tile_high.then_some(len - 1)
    } else {
        Some(t - BORDER)
    }
}

/// Multiply the texture by the four corner colors, interpolated bilinearly
/// across the image
fn modulate(texture: &Pixmap, colors: [Color; 4]) -> Pixmap {
    let mut out = texture.clone();
    let tex_width = out.width();
    let inner_width = (out.width() - 2 * BORDER) as f32;
    let inner_height = (out.height() - 2 * BORDER) as f32;
    let corners = colors.map(|c| {
        [c.r, c.g, c.b, c.a].map(|ch| f32::from(ch) / 255.0)
    });

    for (i, pixel) in out.pixels_mut().iter_mut().enumerate() {
        let px = i as u32 % tex_width;
        let py = i as u32 / tex_width;
        let u = ((px as f32 - BORDER as f32 + 0.5) / inner_width).clamp(0.0, 1.0);
        let v = ((py as f32 - BORDER as f32 + 0.5) / inner_height).clamp(0.0, 1.0);

        let mut c = [0.0f32; 4];
        for (ch, value) in c.iter_mut().enumerate() {
            let top = corners[0][ch] + (corners[1][ch] - corners[0][ch]) * u;
            let bottom = corners[2][ch] + (corners[3][ch] - corners[2][ch]) * u;
            *value = top + (bottom - top) * v;
        }

        let alpha = c[3];
        let r = f32::from(pixel.red()) * c[0] * alpha;
        let g = f32::from(pixel.green()) * c[1] * alpha;
        let b = f32::from(pixel.blue()) * c[2] * alpha;
        let a = f32::from(pixel.alpha()) * alpha;
        *pixel = PremultipliedColorU8::from_rgba(r as u8, g as u8, b as u8, a as u8)
            .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }

    out
}
