use alloc::vec::Vec;

use enough::Stop;
use rgb::AsPixels as _;

use crate::error::TextureError;
use crate::limits::Limits;
use crate::pixel::{Color, ColorMode};

/// Decode request builder.
///
/// ```no_run
/// use zentx2d::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your Tx2D bytes
/// let limits = Limits { max_pixels: Some(4096 * 4096), ..Default::default() };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// # Ok::<(), zentx2d::TextureError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject inputs whose dimensions, pixel count or output size exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Read the container without decoding pixels. The payload stays borrowed.
    pub fn load(&self) -> Result<crate::Texture<'a>, TextureError> {
        crate::tx2d::load(self.data, self.limits)
    }

    /// Read the container and decode every pixel to interleaved RGBA8.
    pub fn decode(&self, stop: impl Stop) -> Result<DecodeOutput, TextureError> {
        crate::tx2d::decode(self.data, self.limits, &stop)
    }
}

/// Decoded texture: interleaved R, G, B, A bytes, one quadruple per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Color mode of the source payload.
    pub mode: ColorMode,
}

impl DecodeOutput {
    pub(crate) fn new(pixels: Vec<u8>, width: u32, height: u32, mode: ColorMode) -> Self {
        Self {
            pixels,
            width,
            height,
            mode,
        }
    }

    /// Access the pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of decoded pixels (`pixels().len() / 4`).
    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / 4
    }

    /// Reinterpret the pixel bytes as colors.
    pub fn as_colors(&self) -> &[Color] {
        self.pixels().as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    ///
    /// Returns [`TextureError::DimensionMismatch`] when `width * height`
    /// differs from the decoded pixel count.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Result<imgref::ImgRef<'_, Color>, TextureError> {
        self.check_dimensions()?;
        Ok(imgref::ImgRef::new(
            self.as_colors(),
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Copy into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> Result<imgref::ImgVec<Color>, TextureError> {
        self.check_dimensions()?;
        Ok(imgref::ImgVec::new(
            self.as_colors().to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }

    #[cfg(feature = "imgref")]
    fn check_dimensions(&self) -> Result<(), TextureError> {
        let area = self.width as usize * self.height as usize;
        if area != self.pixel_count() {
            return Err(TextureError::DimensionMismatch {
                width: self.width,
                height: self.height,
                pixels: self.pixel_count(),
            });
        }
        Ok(())
    }
}
