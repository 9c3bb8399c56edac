use alloc::format;

use crate::error::TextureError;

/// Resource limits for texture decoding.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count. Checked against both `width * height` and the
    /// count derived from the payload length.
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for the RGBA output buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check header dimensions, then their area, against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), TextureError> {
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        self.check_pixels(u64::from(width) * u64::from(height))
    }

    /// Check a pixel count (header- or payload-derived) against `max_pixels`.
    pub(crate) fn check_pixels(&self, pixels: u64) -> Result<(), TextureError> {
        exceeds("pixel count", pixels, self.max_pixels)
    }

    /// Check the size of the RGBA output allocation.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), TextureError> {
        if let Some(max_mem) = self.max_memory_bytes
            && bytes as u64 > max_mem
        {
            return Err(TextureError::LimitExceeded(format!(
                "output of {bytes} bytes exceeds memory limit {max_mem}"
            )));
        }
        Ok(())
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), TextureError> {
    match limit {
        Some(max) if value > max => Err(TextureError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
