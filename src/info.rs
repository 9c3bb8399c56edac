use crate::error::TextureError;
use crate::pixel::ColorMode;
use crate::tx2d::header;

/// Header-level description of a Tx2D buffer, read without decoding pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub mode: ColorMode,
    /// Whether a `"plte"` block is present.
    pub has_palette: bool,
    /// Length of the raw pixel payload in bytes.
    pub payload_len: usize,
    /// Pixel count derived from the payload length and mode.
    pub pixel_count: usize,
}

impl TextureInfo {
    /// Probe a Tx2D buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TextureError> {
        let header = header::parse_header(data)?;
        let payload_len = data.len() - header.payload_offset;
        Ok(Self {
            width: header.width,
            height: header.height,
            mode: header.mode,
            has_palette: header.palette_offset.is_some(),
            payload_len,
            pixel_count: header.mode.pixel_count(payload_len),
        })
    }

    /// Whether `width * height` agrees with the payload-derived pixel count.
    pub fn dimensions_match(&self) -> bool {
        u64::from(self.width) * u64::from(self.height) == self.pixel_count as u64
    }
}
