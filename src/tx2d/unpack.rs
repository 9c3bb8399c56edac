//! Bit extraction and channel rescaling shared by the Tx2D pixel modes.

use crate::pixel::{Color, PixelsPerByte};

/// Extract the packed index of `pixel` from a payload holding `ppb` pixels
/// per byte.
///
/// The first pixel of a byte occupies its most significant bits. With
/// `ppb == One` the shift is zero and the mask covers the whole byte, so this
/// is a plain byte read.
///
/// `pixel` must be below `data.len() * ppb`.
#[inline]
pub(crate) fn packed_index(data: &[u8], pixel: usize, ppb: PixelsPerByte) -> u8 {
    let per_byte = ppb.count();
    let bpp = ppb.bits_per_pixel();
    let i = pixel / per_byte;
    let shift = 8 - bpp * ((pixel % per_byte) as u32 + 1);
    let mask = ((1u16 << bpp) - 1) as u8;
    (data[i] >> shift) & mask
}

/// Rescale a `bits`-wide value to 0..=255 with round-to-nearest.
#[inline]
pub(crate) const fn rescale(value: u32, bits: u32) -> u8 {
    let max = (1u32 << bits) - 1;
    ((value * 255 + max / 2) / max) as u8
}

/// Expand a big-endian RGB565 word to opaque RGBA8.
#[inline]
pub(crate) const fn rgb565_to_rgba(word: u16) -> Color {
    let r5 = (word >> 11) as u32 & 0x1F;
    let g6 = (word >> 5) as u32 & 0x3F;
    let b5 = word as u32 & 0x1F;
    Color {
        r: rescale(r5, 5),
        g: rescale(g6, 6),
        b: rescale(b5, 5),
        a: 255,
    }
}
