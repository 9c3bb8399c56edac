use alloc::vec::Vec;

use crate::error::TextureError;

/// Decoded pixel: four 8-bit channels, R, G, B, A.
pub type Color = rgb::RGBA8;

/// Opaque gray with all three color channels set to `v`.
#[inline]
pub(crate) const fn gray(v: u8) -> Color {
    Color {
        r: v,
        g: v,
        b: v,
        a: 255,
    }
}

/// Unpack a `0xRRGGBBAA` word into a color.
#[inline]
pub(crate) const fn unpack_rgba(word: u32) -> Color {
    let [r, g, b, a] = word.to_be_bytes();
    Color { r, g, b, a }
}

/// How many pixel indices share one byte of a packed payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelsPerByte {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl PixelsPerByte {
    /// Pixels stored in each byte.
    #[inline]
    pub const fn count(self) -> usize {
        self as usize
    }

    /// Width of one packed index in bits.
    #[inline]
    pub const fn bits_per_pixel(self) -> u32 {
        8 / self as u32
    }
}

/// Byte layout of one color mode's payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Packing {
    /// Sub-byte (or exactly one byte) indices, most significant bits first.
    Packed(PixelsPerByte),
    /// Whole bytes per pixel.
    Bytes(usize),
}

/// Pixel layout of a Tx2D payload.
///
/// The discriminant is the on-disk tag.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ColorMode {
    /// 1-bit grayscale, 8 pixels per byte.
    Lum1 = 0,
    /// 2-bit grayscale, 4 pixels per byte.
    Lum2 = 1,
    /// 4-bit grayscale, 2 pixels per byte.
    Lum4 = 2,
    /// 8-bit grayscale.
    Lum8 = 3,
    /// 8-bit grayscale followed by 8-bit alpha.
    LumA8 = 4,
    /// 1-bit palette index (2 colors).
    Palette1 = 5,
    /// 2-bit palette index (4 colors).
    Palette2 = 6,
    /// 4-bit palette index (16 colors).
    Palette4 = 7,
    /// 8-bit palette index (256 colors).
    Palette8 = 8,
    /// 16-bit big-endian 5/6/5 RGB.
    Rgb565 = 9,
    /// 3 bytes per pixel, opaque.
    Rgb8 = 10,
    /// 4 bytes per pixel.
    Rgba8 = 11,
}

impl ColorMode {
    /// All modes in tag order.
    pub const ALL: [ColorMode; 12] = [
        Self::Lum1,
        Self::Lum2,
        Self::Lum4,
        Self::Lum8,
        Self::LumA8,
        Self::Palette1,
        Self::Palette2,
        Self::Palette4,
        Self::Palette8,
        Self::Rgb565,
        Self::Rgb8,
        Self::Rgba8,
    ];

    /// Map an on-disk tag to a mode.
    ///
    /// Tags outside the known set fail with [`TextureError::UnsupportedMode`];
    /// they come from corrupt files or a newer writer.
    pub fn from_tag(tag: u32) -> Result<Self, TextureError> {
        usize::try_from(tag)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(TextureError::UnsupportedMode(tag))
    }

    /// On-disk tag.
    #[inline]
    pub const fn tag(self) -> u32 {
        self as u32
    }

    pub const fn packing(self) -> Packing {
        match self {
            Self::Lum1 | Self::Palette1 => Packing::Packed(PixelsPerByte::Eight),
            Self::Lum2 | Self::Palette2 => Packing::Packed(PixelsPerByte::Four),
            Self::Lum4 | Self::Palette4 => Packing::Packed(PixelsPerByte::Two),
            Self::Lum8 | Self::Palette8 => Packing::Packed(PixelsPerByte::One),
            Self::LumA8 | Self::Rgb565 => Packing::Bytes(2),
            Self::Rgb8 => Packing::Bytes(3),
            Self::Rgba8 => Packing::Bytes(4),
        }
    }

    /// Whether pixels are indices into a palette.
    #[inline]
    pub const fn is_palette(self) -> bool {
        matches!(
            self,
            Self::Palette1 | Self::Palette2 | Self::Palette4 | Self::Palette8
        )
    }

    /// Number of palette entries a palette mode can address (2, 4, 16 or 256).
    pub const fn palette_len(self) -> Option<usize> {
        match (self.is_palette(), self.packing()) {
            (true, Packing::Packed(ppb)) => Some(1 << ppb.bits_per_pixel()),
            _ => None,
        }
    }

    /// Number of pixels held by a payload of `byte_len` bytes.
    ///
    /// Trailing bytes that do not form a whole pixel are ignored. Packed
    /// modes saturate at `usize::MAX`; [`crate::Texture::new`] rejects such
    /// payloads, see [`Self::checked_pixel_count`].
    #[inline]
    pub const fn pixel_count(self, byte_len: usize) -> usize {
        match self.checked_pixel_count(byte_len) {
            Some(n) => n,
            None => usize::MAX,
        }
    }

    /// Like [`Self::pixel_count`], `None` when the count overflows `usize`.
    #[inline]
    pub const fn checked_pixel_count(self, byte_len: usize) -> Option<usize> {
        match self.packing() {
            Packing::Packed(ppb) => byte_len.checked_mul(ppb.count()),
            Packing::Bytes(n) => Some(byte_len / n),
        }
    }
}

impl TryFrom<u32> for ColorMode {
    type Error = TextureError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}

/// Ordered color lookup table for the palette modes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    /// Build a palette from packed `0xRRGGBBAA` words.
    pub fn from_packed(words: &[u32]) -> Self {
        Self(words.iter().map(|&w| unpack_rgba(w)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.0
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Self(colors)
    }
}

impl FromIterator<Color> for Palette {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
