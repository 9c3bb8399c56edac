//! Tx2D container header and palette block.
//!
//! ```plain
//! "Tx2D" | u32le width | u32le height | u32le mode
//! [ "plte" | 2^bits × u32le 0xRRGGBBAA ]   palette modes only
//! payload ...
//! ```

use alloc::vec::Vec;

use crate::error::TextureError;
use crate::pixel::{ColorMode, Palette, unpack_rgba};

pub(crate) const MAGIC: &[u8; 4] = b"Tx2D";
pub(crate) const PALETTE_MARKER: &[u8; 4] = b"plte";

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], TextureError> {
        let end = self.pos.checked_add(N).ok_or(TextureError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(TextureError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    fn get_u32_le(&mut self) -> Result<u32, TextureError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    /// Consume `tag` if the next bytes match it; otherwise leave the position untouched.
    fn eat_tag(&mut self, tag: &[u8]) -> bool {
        if self.data[self.pos..].starts_with(tag) {
            self.pos += tag.len();
            true
        } else {
            false
        }
    }

    fn skip(&mut self, n: usize) -> Result<(), TextureError> {
        let new_pos = self.pos.checked_add(n).ok_or(TextureError::UnexpectedEof)?;
        if new_pos > self.data.len() {
            return Err(TextureError::UnexpectedEof);
        }
        self.pos = new_pos;
        Ok(())
    }
}

// ── Parsed header ───────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub(crate) struct Tx2dHeader {
    pub width: u32,
    pub height: u32,
    pub mode: ColorMode,
    /// Offset of the first palette entry, when a palette block is present.
    pub palette_offset: Option<usize>,
    /// Offset of the pixel payload.
    pub payload_offset: usize,
}

/// Parse the fixed header and locate the palette block and payload.
///
/// Palette entries are skipped, not decoded; see [`read_palette`].
pub(crate) fn parse_header(data: &[u8]) -> Result<Tx2dHeader, TextureError> {
    let mut cursor = Cursor::new(data);

    let magic: [u8; 4] = cursor.read_fixed_bytes().map_err(|_| {
        TextureError::MalformedHeader("input shorter than Tx2D magic".into())
    })?;
    if &magic != MAGIC {
        return Err(TextureError::MalformedHeader(alloc::format!(
            "bad magic {magic:02x?}, expected \"Tx2D\""
        )));
    }

    let width = cursor.get_u32_le()?;
    let height = cursor.get_u32_le()?;
    let mode = ColorMode::from_tag(cursor.get_u32_le()?)?;
    log::debug!("Tx2D header: {width}x{height} {mode:?}");

    let mut palette_offset = None;
    if cursor.eat_tag(PALETTE_MARKER) {
        let Some(entries) = mode.palette_len() else {
            return Err(TextureError::MalformedHeader(alloc::format!(
                "palette block present for non-palette mode {mode:?}"
            )));
        };
        palette_offset = Some(cursor.pos);
        cursor.skip(entries * 4)?;
        log::debug!("Tx2D palette block: {entries} entries");
    }

    Ok(Tx2dHeader {
        width,
        height,
        mode,
        palette_offset,
        payload_offset: cursor.pos,
    })
}

/// Decode the palette block located by [`parse_header`].
pub(crate) fn read_palette(
    data: &[u8],
    header: &Tx2dHeader,
) -> Result<Option<Palette>, TextureError> {
    let (Some(offset), Some(entries)) = (header.palette_offset, header.mode.palette_len()) else {
        return Ok(None);
    };
    let block = data
        .get(offset..offset + entries * 4)
        .ok_or(TextureError::UnexpectedEof)?;

    let colors: Vec<_> = block
        .chunks_exact(4)
        .enumerate()
        .map(|(i, entry)| {
            let word = u32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]]);
            log::trace!("palette[{i}] = {word:#010x}");
            unpack_rgba(word)
        })
        .collect();
    Ok(Some(Palette::new(colors)))
}
