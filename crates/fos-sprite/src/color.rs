//! Colors and blending modes

/// Color (RGBA)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack a 0xAARRGGBB value
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack into 0xAARRGGBB
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl From<Color> for tiny_skia::ColorU8 {
    fn from(c: Color) -> Self {
        tiny_skia::ColorU8::from_rgba(c.r, c.g, c.b, c.a)
    }
}

/// How drawn pixels are composed with the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaMode {
    /// Regular alpha blending (source over)
    #[default]
    Default,
    /// Colors are added to the target
    Additive,
    /// Colors are multiplied with the target
    Multiply,
}

impl AlphaMode {
    pub fn blend_mode(self) -> tiny_skia::BlendMode {
        match self {
            Self::Default => tiny_skia::BlendMode::SourceOver,
            Self::Additive => tiny_skia::BlendMode::Plus,
            Self::Multiply => tiny_skia::BlendMode::Multiply,
        }
    }
}
