//! Image creation flags

use std::ops::{BitOr, BitOrAssign};

/// Bitmask passed through to the backend when an image is created.
///
/// Tileable edges keep hard borders so that neighbouring tiles join without
/// seams; soft edges fade out to transparent when the image is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageFlags(u32);

impl ImageFlags {
    pub const SMOOTH: ImageFlags = ImageFlags(0);
    pub const TILEABLE_LEFT: ImageFlags = ImageFlags(1);
    pub const TILEABLE_TOP: ImageFlags = ImageFlags(2);
    pub const TILEABLE_RIGHT: ImageFlags = ImageFlags(4);
    pub const TILEABLE_BOTTOM: ImageFlags = ImageFlags(8);
    pub const TILEABLE: ImageFlags = ImageFlags(15);
    /// Nearest-neighbour sampling
    pub const RETRO: ImageFlags = ImageFlags(16);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every bit of `other` is set
    pub const fn contains(self, other: ImageFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl From<bool> for ImageFlags {
    /// Maps the legacy `tileable` switch onto flags
    fn from(tileable: bool) -> Self {
        if tileable {
            Self::TILEABLE
        } else {
            Self::SMOOTH
        }
    }
}

impl BitOr for ImageFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ImageFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
