//! Pixel buffers exchanged with the codec.
//!
//! A [`PixelBuffer`] is a row-major 8-bit image with an explicit row stride.
//! Encoding borrows one; decoding returns a freshly allocated one. Platform
//! image types plug in through [`ImageSource`] and [`ImageSink`].

use std::borrow::Cow;

use crate::error::BlurhashError;

/// Largest width or height accepted for an encode input or decode target.
pub const MAX_DIMENSION: u32 = 10_000;

/// Byte order of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelLayout {
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
    /// Blue, green, red, alpha.
    Bgra,
}

impl PixelLayout {
    /// Number of bytes per pixel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba | PixelLayout::Bgra => 4,
        }
    }

    /// Byte offsets of the red, green and blue channels within a pixel.
    #[inline]
    pub const fn rgb_offsets(self) -> [usize; 3] {
        match self {
            PixelLayout::Rgb | PixelLayout::Rgba => [0, 1, 2],
            PixelLayout::Bgra => [2, 1, 0],
        }
    }

    /// Write an RGB triple into `dst` (one pixel), filling alpha with 255.
    #[inline]
    pub(crate) fn store(self, dst: &mut [u8], rgb: [u8; 3]) {
        let [r, g, b] = self.rgb_offsets();
        dst[r] = rgb[0];
        dst[g] = rgb[1];
        dst[b] = rgb[2];
        if self.bytes_per_pixel() == 4 {
            dst[3] = 255;
        }
    }
}

/// Reject zero or oversized dimensions.
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), BlurhashError> {
    if width == 0 || height == 0 {
        return Err(BlurhashError::InvalidDimensions {
            width,
            height,
            reason: "width and height must be > 0",
        });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(BlurhashError::InvalidDimensions {
            width,
            height,
            reason: "dimensions must be <= 10000",
        });
    }
    Ok(())
}

/// A row-major 8-bit image with an explicit row stride.
///
/// Alpha, when present, is carried but ignored by the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<'a> {
    data: Cow<'a, [u8]>,
    width: u32,
    height: u32,
    row_stride: usize,
    layout: PixelLayout,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap a tightly packed buffer (`row_stride == width * bytes_per_pixel`).
    ///
    /// # Examples
    ///
    /// ```
    /// use blurhash_engine::{PixelBuffer, PixelLayout};
    /// let data = [255u8, 0, 0, 0, 255, 0];
    /// let buf = PixelBuffer::new(&data, 2, 1, PixelLayout::Rgb).unwrap();
    /// assert_eq!(buf.pixel(1, 0), [0, 255, 0]);
    /// ```
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, BlurhashError> {
        let row_stride = width as usize * layout.bytes_per_pixel();
        Self::with_stride(data, width, height, row_stride, layout)
    }

    /// Wrap a buffer whose rows start `row_stride` bytes apart.
    ///
    /// # Errors
    ///
    /// [`BlurhashError::InvalidDimensions`] for zero or oversized dimensions or a
    /// stride shorter than one row; [`BlurhashError::BufferTooSmall`] if `data`
    /// cannot hold `height` rows.
    pub fn with_stride(
        data: &'a [u8],
        width: u32,
        height: u32,
        row_stride: usize,
        layout: PixelLayout,
    ) -> Result<Self, BlurhashError> {
        validate(data.len(), width, height, row_stride, layout)?;
        Ok(Self {
            data: Cow::Borrowed(data),
            width,
            height,
            row_stride,
            layout,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between the starts of consecutive rows.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Channel order of each pixel.
    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// The raw bytes, including any row padding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The pixel bytes of row `y`, without padding.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.row_stride;
        &self.data[start..start + self.width as usize * self.layout.bytes_per_pixel()]
    }

    /// RGB bytes of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let bpp = self.layout.bytes_per_pixel();
        let base = y as usize * self.row_stride + x as usize * bpp;
        let [r, g, b] = self.layout.rgb_offsets();
        [self.data[base + r], self.data[base + g], self.data[base + b]]
    }

    /// Detach from any borrowed storage.
    pub fn into_owned(self) -> PixelBuffer<'static> {
        PixelBuffer {
            data: Cow::Owned(self.data.into_owned()),
            width: self.width,
            height: self.height,
            row_stride: self.row_stride,
            layout: self.layout,
        }
    }

    /// Take the underlying bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data.into_owned()
    }
}

impl PixelBuffer<'static> {
    /// Take ownership of a tightly packed buffer.
    pub fn from_vec(
        data: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, BlurhashError> {
        let row_stride = width as usize * layout.bytes_per_pixel();
        validate(data.len(), width, height, row_stride, layout)?;
        Ok(Self {
            data: Cow::Owned(data),
            width,
            height,
            row_stride,
            layout,
        })
    }
}

fn validate(
    len: usize,
    width: u32,
    height: u32,
    row_stride: usize,
    layout: PixelLayout,
) -> Result<(), BlurhashError> {
    check_dimensions(width, height)?;
    let row_bytes = width as usize * layout.bytes_per_pixel();
    if row_stride < row_bytes {
        return Err(BlurhashError::InvalidDimensions {
            width,
            height,
            reason: "row stride is shorter than one row of pixels",
        });
    }
    // The last row needs no trailing padding.
    let expected = (height as usize - 1)
        .checked_mul(row_stride)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or(BlurhashError::InvalidDimensions {
            width,
            height,
            reason: "dimensions overflow buffer size calculation",
        })?;
    if len < expected {
        return Err(BlurhashError::BufferTooSmall {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// A platform image that can lend its pixels to the encoder.
pub trait ImageSource {
    /// Borrow the image as a pixel buffer.
    fn pixel_buffer(&self) -> Result<PixelBuffer<'_>, BlurhashError>;
}

/// A platform image that can be built from decoded pixels.
pub trait ImageSink: Sized {
    /// Construct the image from a decoded buffer.
    fn from_pixel_buffer(pixels: PixelBuffer<'static>) -> Result<Self, BlurhashError>;
}

impl ImageSource for PixelBuffer<'_> {
    fn pixel_buffer(&self) -> Result<PixelBuffer<'_>, BlurhashError> {
        Ok(PixelBuffer {
            data: Cow::Borrowed(&*self.data),
            width: self.width,
            height: self.height,
            row_stride: self.row_stride,
            layout: self.layout,
        })
    }
}

impl ImageSink for PixelBuffer<'static> {
    fn from_pixel_buffer(pixels: PixelBuffer<'static>) -> Result<Self, BlurhashError> {
        Ok(pixels)
    }
}

#[cfg(feature = "image")]
mod image_support {
    use super::*;

    impl ImageSource for image::RgbImage {
        fn pixel_buffer(&self) -> Result<PixelBuffer<'_>, BlurhashError> {
            PixelBuffer::new(self.as_raw(), self.width(), self.height(), PixelLayout::Rgb)
        }
    }

    impl ImageSource for image::RgbaImage {
        fn pixel_buffer(&self) -> Result<PixelBuffer<'_>, BlurhashError> {
            PixelBuffer::new(self.as_raw(), self.width(), self.height(), PixelLayout::Rgba)
        }
    }

    /// Repack `pixels` into a tightly packed buffer of `layout`.
    fn repack(pixels: &PixelBuffer<'_>, layout: PixelLayout) -> Vec<u8> {
        let bpp = layout.bytes_per_pixel();
        let mut out = vec![0u8; pixels.width() as usize * pixels.height() as usize * bpp];
        let mut chunks = out.chunks_exact_mut(bpp);
        for y in 0..pixels.height() {
            for x in 0..pixels.width() {
                if let Some(dst) = chunks.next() {
                    layout.store(dst, pixels.pixel(x, y));
                }
            }
        }
        out
    }

    impl ImageSink for image::RgbImage {
        fn from_pixel_buffer(pixels: PixelBuffer<'static>) -> Result<Self, BlurhashError> {
            let (width, height) = (pixels.width(), pixels.height());
            let data = repack(&pixels, PixelLayout::Rgb);
            image::RgbImage::from_raw(width, height, data).ok_or(BlurhashError::BufferTooSmall {
                expected: width as usize * height as usize * 3,
                actual: 0,
            })
        }
    }

    impl ImageSink for image::RgbaImage {
        fn from_pixel_buffer(pixels: PixelBuffer<'static>) -> Result<Self, BlurhashError> {
            let (width, height) = (pixels.width(), pixels.height());
            let data = repack(&pixels, PixelLayout::Rgba);
            image::RgbaImage::from_raw(width, height, data).ok_or(BlurhashError::BufferTooSmall {
                expected: width as usize * height as usize * 4,
                actual: 0,
            })
        }
    }
}
