//! # zentx2d
//!
//! Reader and pixel decoder for the Tx2D texture container.
//!
//! ## Container
//!
//! - 4-byte magic `Tx2D`
//! - u32le width, u32le height, u32le color-mode tag
//! - optional `plte` marker followed by `2^bits` u32le `0xRRGGBBAA` palette
//!   entries (palette modes only)
//! - raw pixel payload up to end of input
//!
//! ## Color modes
//!
//! | Mode | Payload | Output |
//! |---|---|---|
//! | `Lum1/2/4/8` | 8/4/2/1 pixels per byte, MSB first | gray, rescaled to 0..=255 |
//! | `LumA8` | luminance, alpha | gray with alpha |
//! | `Palette1/2/4/8` | packed index, like `Lum*` | palette entry |
//! | `Rgb565` | u16 big-endian 5/6/5 | rescaled RGB, opaque |
//! | `Rgb8` | R, G, B | opaque |
//! | `Rgba8` | R, G, B, A | as stored |
//!
//! A palette mode without a palette block decodes its indices as grayscale,
//! identical to the `Lum*` mode of the same width. This is intentional.
//!
//! The pixel count is always derived from the payload length and mode; the
//! header's width and height are carried through for callers.
//!
//! ## Usage
//!
//! ```no_run
//! use zentx2d::{DecodeRequest, TextureInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // your Tx2D bytes
//!
//! // Probe without decoding
//! let info = TextureInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.mode);
//!
//! // Flattened RGBA8
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! assert_eq!(decoded.pixels().len(), info.pixel_count * 4);
//!
//! // Per-pixel access
//! let texture = zentx2d::load(data)?;
//! let first = texture.pixel(0)?;
//! # let _ = first;
//! # Ok::<(), zentx2d::TextureError>(())
//! ```
//!
//! ## Features
//!
//! - `std`: link the standard library (the crate is `no_std` + `alloc` otherwise)
//! - `imgref`: `DecodeOutput::as_imgref` / `to_imgvec`
//! - `parallel`: decode bulk pixel blocks on the rayon thread pool

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod info;
mod limits;
mod pixel;
mod texture;
mod tx2d;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::TextureError;
pub use info::TextureInfo;
pub use limits::Limits;
pub use pixel::{Color, ColorMode, Packing, Palette, PixelsPerByte};
pub use texture::{Pixels, Texture};

/// Decode a Tx2D buffer to interleaved RGBA8.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, TextureError> {
    DecodeRequest::new(data).decode(stop)
}

/// Read a Tx2D buffer without decoding pixels. The payload stays borrowed from `data`.
pub fn load(data: &[u8]) -> Result<Texture<'_>, TextureError> {
    DecodeRequest::new(data).load()
}

/// Number of pixels held by `byte_len` payload bytes in `mode`.
///
/// Raw tags become a [`ColorMode`] through [`ColorMode::from_tag`], which is
/// where unknown tags fail with [`TextureError::UnsupportedMode`].
pub fn pixel_count(mode: ColorMode, byte_len: usize) -> usize {
    mode.pixel_count(byte_len)
}
