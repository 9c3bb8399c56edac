//! Immutable Tx2D payload and the per-mode pixel decoder.

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;
use core::iter::FusedIterator;

use enough::Stop;
use rgb::AsPixels as _;

use crate::error::TextureError;
use crate::pixel::{Color, ColorMode, Palette, PixelsPerByte, gray};
use crate::tx2d::unpack::{packed_index, rescale, rgb565_to_rgba};

/// Pixels decoded between cancellation checks in bulk operations.
const STOP_INTERVAL: usize = 4096;

/// A texture payload: dimensions, color mode, raw pixel bytes and an optional palette.
///
/// Decoding never mutates the texture, so one instance can be shared across
/// threads and read concurrently.
///
/// `width` and `height` are carried for callers; the pixel count is always
/// derived from the payload length and mode (see [`ColorMode::pixel_count`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture<'a> {
    width: u32,
    height: u32,
    mode: ColorMode,
    data: Cow<'a, [u8]>,
    palette: Option<Palette>,
}

impl<'a> Texture<'a> {
    /// Build a texture from parts.
    ///
    /// A palette is only accepted for palette modes and must cover every
    /// index the mode can encode. A palette mode without a palette is valid:
    /// its indices decode as grayscale, exactly like the matching `Lum*` mode.
    pub fn new(
        width: u32,
        height: u32,
        mode: ColorMode,
        data: impl Into<Cow<'a, [u8]>>,
        palette: Option<Palette>,
    ) -> Result<Self, TextureError> {
        if let Some(palette) = &palette {
            let Some(needed) = mode.palette_len() else {
                return Err(TextureError::UnexpectedPalette(mode));
            };
            if palette.len() < needed {
                return Err(TextureError::PaletteTooShort {
                    needed,
                    actual: palette.len(),
                });
            }
        } else if mode.is_palette() {
            log::warn!("{mode:?} texture has no palette, indices decode as grayscale");
        }

        let data = data.into();
        addressable_pixels(mode, data.len())?;

        Ok(Self {
            width,
            height,
            mode,
            data,
            palette,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// The undecoded payload.
    pub fn raw(&self) -> &[u8] {
        &self.data
    }

    /// One byte of the undecoded payload.
    pub fn byte(&self, i: usize) -> Option<u8> {
        self.data.get(i).copied()
    }

    /// Number of pixels in the payload.
    pub fn pixel_count(&self) -> usize {
        self.mode.pixel_count(self.data.len())
    }

    /// Whether the payload is borrowed from the input buffer.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.data, Cow::Borrowed(_))
    }

    /// Take ownership of the payload (copies if borrowed).
    pub fn into_owned(self) -> Texture<'static> {
        Texture {
            width: self.width,
            height: self.height,
            mode: self.mode,
            data: Cow::Owned(self.data.into_owned()),
            palette: self.palette,
        }
    }

    /// Decode a single pixel.
    pub fn pixel(&self, index: usize) -> Result<Color, TextureError> {
        let count = self.pixel_count();
        if index >= count {
            return Err(TextureError::IndexOutOfRange { index, count });
        }
        Ok(self.decode_at(index))
    }

    /// Iterate over every pixel in order. Each call starts from pixel 0.
    pub fn iter(&self) -> Pixels<'_> {
        Pixels {
            texture: self,
            front: 0,
            back: self.pixel_count(),
        }
    }

    /// Decode every pixel, in pixel order.
    pub fn pixels(&self, stop: impl Stop) -> Result<Vec<Color>, TextureError> {
        self.decode_all(&stop)
    }

    /// Decode every pixel into interleaved R, G, B, A bytes.
    pub fn to_rgba_bytes(&self, stop: impl Stop) -> Result<Vec<u8>, TextureError> {
        self.decode_rgba_bytes(&stop)
    }

    pub(crate) fn decode_all(&self, stop: &dyn Stop) -> Result<Vec<Color>, TextureError> {
        let mut out = vec![Color::default(); self.pixel_count()];
        self.decode_into(&mut out, stop)?;
        Ok(out)
    }

    /// Decode straight into the byte buffer; no intermediate color vector.
    pub(crate) fn decode_rgba_bytes(&self, stop: &dyn Stop) -> Result<Vec<u8>, TextureError> {
        let len = self.pixel_count().checked_mul(4).ok_or_else(|| {
            TextureError::LimitExceeded(alloc::format!(
                "{} pixels exceed the addressable RGBA output",
                self.pixel_count()
            ))
        })?;
        let mut out = vec![0u8; len];
        self.decode_into(out.as_pixels_mut(), stop)?;
        Ok(out)
    }

    fn decode_into(&self, out: &mut [Color], stop: &dyn Stop) -> Result<(), TextureError> {
        for (block_idx, block) in out.chunks_mut(STOP_INTERVAL).enumerate() {
            stop.check()?;
            self.decode_block(block_idx * STOP_INTERVAL, block);
        }
        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    fn decode_block(&self, start: usize, block: &mut [Color]) {
        for (offset, px) in block.iter_mut().enumerate() {
            *px = self.decode_at(start + offset);
        }
    }

    #[cfg(feature = "parallel")]
    fn decode_block(&self, start: usize, block: &mut [Color]) {
        use rayon::prelude::*;

        block
            .par_iter_mut()
            .enumerate()
            .for_each(|(offset, px)| *px = self.decode_at(start + offset));
    }

    /// Decode pixel `pixel`, which must be below [`Self::pixel_count`].
    fn decode_at(&self, pixel: usize) -> Color {
        let data = &*self.data;
        match self.mode {
            ColorMode::Lum1 => lum(data, pixel, PixelsPerByte::Eight),
            ColorMode::Lum2 => lum(data, pixel, PixelsPerByte::Four),
            ColorMode::Lum4 => lum(data, pixel, PixelsPerByte::Two),
            ColorMode::Lum8 => lum(data, pixel, PixelsPerByte::One),

            ColorMode::LumA8 => {
                let i = pixel * 2;
                let v = data[i];
                Color::new(v, v, v, data[i + 1])
            }

            ColorMode::Palette1 => self.indexed(pixel, PixelsPerByte::Eight),
            ColorMode::Palette2 => self.indexed(pixel, PixelsPerByte::Four),
            ColorMode::Palette4 => self.indexed(pixel, PixelsPerByte::Two),
            ColorMode::Palette8 => self.indexed(pixel, PixelsPerByte::One),

            ColorMode::Rgb565 => {
                let i = pixel * 2;
                rgb565_to_rgba(u16::from_be_bytes([data[i], data[i + 1]]))
            }
            ColorMode::Rgb8 => {
                let i = pixel * 3;
                Color::new(data[i], data[i + 1], data[i + 2], 255)
            }
            ColorMode::Rgba8 => {
                let i = pixel * 4;
                Color::new(data[i], data[i + 1], data[i + 2], data[i + 3])
            }
        }
    }

    fn indexed(&self, pixel: usize, ppb: PixelsPerByte) -> Color {
        match &self.palette {
            // `new` guarantees the palette covers every index of this width.
            Some(palette) => {
                let index = packed_index(&self.data, pixel, ppb);
                palette.as_slice()[usize::from(index)]
            }
            None => lum(&self.data, pixel, ppb),
        }
    }
}

/// Reject payloads whose pixel count does not fit in `usize`.
fn addressable_pixels(mode: ColorMode, byte_len: usize) -> Result<usize, TextureError> {
    mode.checked_pixel_count(byte_len).ok_or_else(|| {
        TextureError::LimitExceeded(alloc::format!(
            "{byte_len}-byte {mode:?} payload holds more than usize::MAX pixels"
        ))
    })
}

fn lum(data: &[u8], pixel: usize, ppb: PixelsPerByte) -> Color {
    let index = packed_index(data, pixel, ppb);
    gray(rescale(u32::from(index), ppb.bits_per_pixel()))
}

impl<'t> IntoIterator for &'t Texture<'_> {
    type Item = Color;
    type IntoIter = Pixels<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the decoded pixels of a [`Texture`].
#[derive(Clone, Debug)]
pub struct Pixels<'t> {
    texture: &'t Texture<'t>,
    front: usize,
    back: usize,
}

impl Iterator for Pixels<'_> {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        if self.front >= self.back {
            return None;
        }
        let c = self.texture.decode_at(self.front);
        self.front += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<Color> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for Pixels<'_> {
    fn next_back(&mut self) -> Option<Color> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.texture.decode_at(self.back))
    }
}

impl ExactSizeIterator for Pixels<'_> {}

impl FusedIterator for Pixels<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    fn tex(mode: ColorMode, data: &[u8]) -> Texture<'_> {
        Texture::new(0, 0, mode, data, None).unwrap()
    }

    #[test]
    fn lum8_extremes() {
        let t = tex(ColorMode::Lum8, &[0x00, 0xFF]);
        assert_eq!(t.pixel(0).unwrap(), Color::new(0, 0, 0, 255));
        assert_eq!(t.pixel(1).unwrap(), Color::new(255, 255, 255, 255));
    }

    #[test]
    fn lum1_high_bit() {
        let t = tex(ColorMode::Lum1, &[0x80]);
        assert_eq!(t.pixel_count(), 8);
        assert_eq!(t.pixel(0).unwrap(), Color::new(255, 255, 255, 255));
        for p in 1..8 {
            assert_eq!(t.pixel(p).unwrap(), Color::new(0, 0, 0, 255), "pixel {p}");
        }
    }

    #[test]
    fn lum2_and_lum4_levels() {
        let t = tex(ColorMode::Lum2, &[0b00_01_10_11]);
        let levels: Vec<u8> = t.iter().map(|c| c.r).collect();
        assert_eq!(levels, [0, 85, 170, 255]);

        let t = tex(ColorMode::Lum4, &[0x0F, 0x87]);
        let levels: Vec<u8> = t.iter().map(|c| c.g).collect();
        assert_eq!(levels, [0, 255, 136, 119]);
    }

    #[test]
    fn luma8_carries_alpha() {
        let t = tex(ColorMode::LumA8, &[200, 17, 9]);
        assert_eq!(t.pixel_count(), 1);
        assert_eq!(t.pixel(0).unwrap(), Color::new(200, 200, 200, 17));
    }

    #[test]
    fn rgb565_big_endian() {
        let t = tex(ColorMode::Rgb565, &[0xF8, 0x00, 0x07, 0xE0, 0x00, 0x1F]);
        let px = t.pixels(Unstoppable).unwrap();
        assert_eq!(
            px,
            [
                Color::new(255, 0, 0, 255),
                Color::new(0, 255, 0, 255),
                Color::new(0, 0, 255, 255),
            ]
        );
    }

    #[test]
    fn direct_modes() {
        let t = tex(ColorMode::Rgb8, &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(t.pixel_count(), 2);
        assert_eq!(t.pixel(1).unwrap(), Color::new(4, 5, 6, 255));

        let t = tex(ColorMode::Rgba8, &[10, 20, 30, 40]);
        assert_eq!(t.pixel(0).unwrap(), Color::new(10, 20, 30, 40));
    }

    #[test]
    fn palette_lookup() {
        let palette = Palette::from_packed(&[0x1020_30FF, 0xA0B0_C0D0, 0, 0x0000_00FF]);
        let t = Texture::new(4, 1, ColorMode::Palette2, &[0b01_11_00_01][..], Some(palette))
            .unwrap();
        let px: Vec<Color> = t.iter().collect();
        assert_eq!(
            px,
            [
                Color::new(0xA0, 0xB0, 0xC0, 0xD0),
                Color::new(0, 0, 0, 255),
                Color::new(0x10, 0x20, 0x30, 0xFF),
                Color::new(0xA0, 0xB0, 0xC0, 0xD0),
            ]
        );
    }

    #[test]
    fn palette_fallback_matches_lum() {
        let data = [0x1F, 0xE4, 0x7A];
        for (pal, lum) in [
            (ColorMode::Palette1, ColorMode::Lum1),
            (ColorMode::Palette2, ColorMode::Lum2),
            (ColorMode::Palette4, ColorMode::Lum4),
            (ColorMode::Palette8, ColorMode::Lum8),
        ] {
            let a = tex(pal, &data).pixels(Unstoppable).unwrap();
            let b = tex(lum, &data).pixels(Unstoppable).unwrap();
            assert_eq!(a, b, "{pal:?} vs {lum:?}");
        }
    }

    #[test]
    fn palette_validation() {
        let short = Palette::from_packed(&[0; 15]);
        match Texture::new(1, 1, ColorMode::Palette4, &[0u8][..], Some(short)) {
            Err(TextureError::PaletteTooShort { needed, actual }) => {
                assert_eq!((needed, actual), (16, 15));
            }
            other => panic!("expected PaletteTooShort, got {other:?}"),
        }

        let pal = Palette::from_packed(&[0; 4]);
        assert!(matches!(
            Texture::new(1, 1, ColorMode::Rgb8, &[0u8; 3][..], Some(pal)),
            Err(TextureError::UnexpectedPalette(ColorMode::Rgb8))
        ));
    }

    #[test]
    fn out_of_range_every_mode() {
        let data = [0u8; 12];
        for mode in ColorMode::ALL {
            let t = tex(mode, &data);
            let count = t.pixel_count();
            assert!(t.pixel(count - 1).is_ok(), "{mode:?}");
            match t.pixel(count) {
                Err(TextureError::IndexOutOfRange { index, count: c }) => {
                    assert_eq!((index, c), (count, count));
                }
                other => panic!("{mode:?}: expected IndexOutOfRange, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_payload() {
        let t = tex(ColorMode::Rgba8, &[]);
        assert_eq!(t.pixel_count(), 0);
        assert!(t.pixels(Unstoppable).unwrap().is_empty());
        assert!(t.to_rgba_bytes(Unstoppable).unwrap().is_empty());
        assert!(t.pixel(0).is_err());
    }

    #[test]
    fn iterator_is_restartable_and_exact() {
        let t = tex(ColorMode::Lum4, &[0x12, 0x34, 0x56]);
        let mut it = t.iter();
        assert_eq!(it.len(), 6);
        it.next();
        assert_eq!(it.len(), 5);
        assert_eq!(it.next_back(), Some(t.pixel(5).unwrap()));
        assert_eq!(it.nth(1), Some(t.pixel(2).unwrap()));

        let first: Vec<Color> = t.iter().collect();
        let second: Vec<Color> = (&t).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, t.pixels(Unstoppable).unwrap());
    }

    #[test]
    fn rgba_bytes_interleaved() {
        let t = tex(ColorMode::LumA8, &[1, 2, 3, 4]);
        assert_eq!(
            t.to_rgba_bytes(Unstoppable).unwrap(),
            [1, 1, 1, 2, 3, 3, 3, 4]
        );
    }

    #[test]
    fn bulk_decode_spans_stop_blocks() {
        let data: Vec<u8> = (0..STOP_INTERVAL * 3 + 7).map(|i| i as u8).collect();
        let t = tex(ColorMode::Lum8, &data);
        let px = t.pixels(Unstoppable).unwrap();
        assert_eq!(px.len(), data.len());
        for (i, c) in px.iter().enumerate() {
            assert_eq!(*c, gray(data[i]), "pixel {i}");
        }
    }

    #[test]
    fn rgba_bytes_span_stop_blocks() {
        let data: Vec<u8> = (0..STOP_INTERVAL + 5).map(|i| (i * 7) as u8).collect();
        for mode in [ColorMode::Lum4, ColorMode::Rgb565, ColorMode::Rgba8] {
            let t = tex(mode, &data);
            let bytes = t.to_rgba_bytes(Unstoppable).unwrap();
            assert_eq!(bytes.len(), t.pixel_count() * 4, "{mode:?}");
            let flat: Vec<u8> = t
                .pixels(Unstoppable)
                .unwrap()
                .iter()
                .flat_map(|c| [c.r, c.g, c.b, c.a])
                .collect();
            assert_eq!(bytes, flat, "{mode:?}");
        }
    }

    #[test]
    fn oversized_packed_payload_is_rejected() {
        let too_many = usize::MAX / 8 + 1;
        assert!(matches!(
            addressable_pixels(ColorMode::Lum1, too_many),
            Err(TextureError::LimitExceeded(_))
        ));
        assert!(addressable_pixels(ColorMode::Palette2, too_many).is_ok());
        assert_eq!(
            addressable_pixels(ColorMode::Rgba8, usize::MAX).unwrap(),
            usize::MAX / 4
        );
    }

    #[test]
    fn cancelled_bulk_decode() {
        struct Cancelled;
        impl Stop for Cancelled {
            fn check(&self) -> Result<(), enough::StopReason> {
                Err(enough::StopReason::Cancelled)
            }
        }
        let t = tex(ColorMode::Lum8, &[1, 2, 3]);
        assert!(matches!(
            t.pixels(Cancelled),
            Err(TextureError::Cancelled(_))
        ));
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Texture<'static>>();
    }

    #[test]
    fn owned_copy_decodes_the_same() {
        let data = [9u8, 8, 7];
        let t = tex(ColorMode::Rgb8, &data);
        assert!(t.is_borrowed());
        let owned = t.clone().into_owned();
        assert!(!owned.is_borrowed());
        assert_eq!(owned.pixel(0).unwrap(), t.pixel(0).unwrap());
        assert_eq!(owned.byte(2), Some(7));
        assert_eq!(owned.byte(3), None);
    }
}
