use alloc::string::String;
use enough::StopReason;

/// Errors from Tx2D container reading and pixel decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TextureError {
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("unsupported color mode tag: {0}")]
    UnsupportedMode(u32),

    #[error("pixel index {index} out of range (texture has {count} pixels)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("palette supplied for non-palette mode {0:?}")]
    UnexpectedPalette(crate::ColorMode),

    #[error("palette too short: need {needed} entries, got {actual}")]
    PaletteTooShort { needed: usize, actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("{width}x{height} does not match {pixels} decoded pixels")]
    DimensionMismatch {
        width: u32,
        height: u32,
        pixels: usize,
    },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for TextureError {
    fn from(r: StopReason) -> Self {
        TextureError::Cancelled(r)
    }
}
