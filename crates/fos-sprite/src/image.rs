//! Image - drawable handle around backend image data
//!
//! An `Image` owns exactly one `ImageData`. Its size is whatever the backend
//! reports, and every draw call is turned into a quad that the backend
//! composes.

use std::fmt;
use std::path::Path;

use crate::math::{offset_x, offset_y};
use crate::{
    io, AlphaMode, Bitmap, Color, ImageData, ImageFactory, ImageFlags, Quad, Region, Result,
    SpriteError, Vertex, ZPos,
};

/// Drawable image
pub struct Image {
    data: Box<dyn ImageData>,
}

impl Image {
    /// Load an image file and use all of it
    pub fn from_file(
        factory: &dyn ImageFactory,
        path: impl AsRef<Path>,
        flags: ImageFlags,
    ) -> Result<Self> {
        let bitmap = io::load_image_file(path)?;
        Self::from_bitmap(factory, &bitmap, flags)
    }

    /// Load an image file and use the given region of it
    pub fn from_file_region(
        factory: &dyn ImageFactory,
        path: impl AsRef<Path>,
        region: Region,
        flags: ImageFlags,
    ) -> Result<Self> {
        let bitmap = io::load_image_file(path)?;
        Self::from_bitmap_region(factory, &bitmap, region, flags)
    }

    pub fn from_bitmap(factory: &dyn ImageFactory, source: &Bitmap, flags: ImageFlags) -> Result<Self> {
        Self::from_bitmap_region(factory, source, Region::full(source), flags)
    }

    pub fn from_bitmap_region(
        factory: &dyn ImageFactory,
        source: &Bitmap,
        region: Region,
        flags: ImageFlags,
    ) -> Result<Self> {
        let data = create_data(factory, source, region, flags)?;
        Ok(Self { data })
    }

    /// Wrap backend data that was created elsewhere
    pub fn from_data(data: Box<dyn ImageData>) -> Self {
        Self { data }
    }

    #[deprecated(note = "use `Image::from_file` with `ImageFlags`")]
    pub fn from_file_tileable(
        factory: &dyn ImageFactory,
        path: impl AsRef<Path>,
        tileable: bool,
    ) -> Result<Self> {
        Self::from_file(factory, path, ImageFlags::from(tileable))
    }

    #[deprecated(note = "use `Image::from_file_region` with `ImageFlags`")]
    pub fn from_file_region_tileable(
        factory: &dyn ImageFactory,
        path: impl AsRef<Path>,
        region: Region,
        tileable: bool,
    ) -> Result<Self> {
        Self::from_file_region(factory, path, region, ImageFlags::from(tileable))
    }

    #[deprecated(note = "use `Image::from_bitmap` with `ImageFlags`")]
    pub fn from_bitmap_tileable(
        factory: &dyn ImageFactory,
        source: &Bitmap,
        tileable: bool,
    ) -> Result<Self> {
        Self::from_bitmap(factory, source, ImageFlags::from(tileable))
    }

    #[deprecated(note = "use `Image::from_bitmap_region` with `ImageFlags`")]
    pub fn from_bitmap_region_tileable(
        factory: &dyn ImageFactory,
        source: &Bitmap,
        region: Region,
        tileable: bool,
    ) -> Result<Self> {
        Self::from_bitmap_region(factory, source, region, ImageFlags::from(tileable))
    }

    pub fn width(&self) -> u32 {
        self.data.width()
    }

    pub fn height(&self) -> u32 {
        self.data.height()
    }

    pub fn data(&self) -> &dyn ImageData {
        self.data.as_ref()
    }

    /// Copy of the image's pixels, as held by the backend
    pub fn to_bitmap(&self) -> Bitmap {
        self.data.to_bitmap()
    }

    /// Draw with the top-left corner at (x, y), scaled by the factors
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        x: f64,
        y: f64,
        z: ZPos,
        factor_x: f64,
        factor_y: f64,
        color: Color,
        mode: AlphaMode,
    ) {
        self.draw_mod(x, y, z, factor_x, factor_y, color, color, color, color, mode);
    }

    /// Like `draw`, with one color per corner: top-left, top-right,
    /// bottom-left, bottom-right
    #[allow(clippy::too_many_arguments)]
    pub fn draw_mod(
        &self,
        x: f64,
        y: f64,
        z: ZPos,
        factor_x: f64,
        factor_y: f64,
        c1: Color,
        c2: Color,
        c3: Color,
        c4: Color,
        mode: AlphaMode,
    ) {
        let x2 = x + f64::from(self.width()) * factor_x;
        let y2 = y + f64::from(self.height()) * factor_y;

        let quad = Quad::axis_aligned(x, y, x2, y2, [c1, c2, c3, c4]);
        self.data.draw(&quad, z, mode);
    }

    /// Draw rotated by `angle` degrees around the pivot (center_x, center_y),
    /// given relative to the image size (0.5, 0.5 is the middle). The pivot
    /// ends up at (x, y).
    #[allow(clippy::too_many_arguments)]
    pub fn draw_rot(
        &self,
        x: f64,
        y: f64,
        z: ZPos,
        angle: f64,
        center_x: f64,
        center_y: f64,
        factor_x: f64,
        factor_y: f64,
        color: Color,
        mode: AlphaMode,
    ) {
        let size_x = f64::from(self.width()) * factor_x;
        let size_y = f64::from(self.height()) * factor_y;
        let offs_x = offset_x(angle, 1.0);
        let offs_y = offset_y(angle, 1.0);

        // Offsets from the pivot to the centers of the rotated image's edges
        let to_left = (offs_y * size_x * center_x, -offs_x * size_x * center_x);
        let to_right = (-offs_y * size_x * (1.0 - center_x), offs_x * size_x * (1.0 - center_x));
        let to_top = (offs_x * size_y * center_y, offs_y * size_y * center_y);
        let to_bottom = (-offs_x * size_y * (1.0 - center_y), -offs_y * size_y * (1.0 - center_y));

        let corner = |h: (f64, f64), v: (f64, f64)| Vertex::new(x + h.0 + v.0, y + h.1 + v.1, color);
        let quad = Quad::new(
            corner(to_left, to_top),
            corner(to_right, to_top),
            corner(to_left, to_bottom),
            corner(to_right, to_bottom),
        );
        self.data.draw(&quad, z, mode);
    }

    /// Hand a caller-built quad straight to the backend
    pub fn draw_quad(&self, quad: &Quad, z: ZPos, mode: AlphaMode) {
        self.data.draw(quad, z, mode);
    }
}

impl TryFrom<Option<Box<dyn ImageData>>> for Image {
    type Error = SpriteError;

    fn try_from(data: Option<Box<dyn ImageData>>) -> Result<Self> {
        data.map(Self::from_data).ok_or_else(|| {
            SpriteError::InvalidArgument("an image cannot be created without image data".into())
        })
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// The one place backends are requested from
fn create_data(
    factory: &dyn ImageFactory,
    source: &Bitmap,
    region: Region,
    flags: ImageFlags,
) -> Result<Box<dyn ImageData>> {
    factory.create_image(source, region, flags)
}
