//! Tx2D container format (internal).
//!
//! Tx2D is a flat container: 4-byte magic (`"Tx2D"`), width, height and
//! color-mode tag as u32 little-endian, an optional `"plte"` palette block
//! for the palette modes, then the raw pixel payload up to end of input.

pub(crate) mod header;
pub(crate) mod unpack;

use crate::decode::DecodeOutput;
use crate::error::TextureError;
use crate::limits::Limits;
use crate::texture::Texture;
use enough::Stop;

/// Read the container into a texture borrowing its payload from `data`.
pub(crate) fn load<'a>(
    data: &'a [u8],
    limits: Option<&Limits>,
) -> Result<Texture<'a>, TextureError> {
    let header = header::parse_header(data)?;
    let payload = &data[header.payload_offset..];
    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
        limits.check_pixels(header.mode.pixel_count(payload.len()) as u64)?;
    }
    let palette = header::read_palette(data, &header)?;
    log::debug!(
        "Tx2D payload: {} bytes, {} pixels",
        payload.len(),
        header.mode.pixel_count(payload.len())
    );
    Texture::new(header.width, header.height, header.mode, payload, palette)
}

/// Read the container and decode every pixel to RGBA8.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, TextureError> {
    let texture = load(data, limits)?;
    let out_bytes = texture
        .pixel_count()
        .checked_mul(4)
        .ok_or(TextureError::DimensionsTooLarge {
            width: texture.width(),
            height: texture.height(),
        })?;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes)?;
    }
    stop.check()?;
    let pixels = texture.decode_rgba_bytes(stop)?;
    Ok(DecodeOutput::new(
        pixels,
        texture.width(),
        texture.height(),
        texture.mode(),
    ))
}
