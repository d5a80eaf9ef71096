//! BlurHash decoding: convert a BlurHash string back into an image.
//!
//! The decoder parses the base83-encoded string, dequantizes the coefficients
//! and reconstructs an image of any requested size.

use crate::color::linear_to_srgb;
use crate::engine::{self, ComputeStrategy};
use crate::error::BlurhashError;
use crate::hash::{self, Validation};
use crate::pixels::{check_dimensions, ImageSink, PixelBuffer, PixelLayout};

/// A configured decoder.
///
/// # Examples
///
/// ```
/// use blurhash_engine::{Decoder, PixelLayout, Validation};
///
/// let decoder = Decoder::new()
///     .with_punch(1.5)
///     .with_layout(PixelLayout::Rgba)
///     .with_validation(Validation::Strict);
/// let image = decoder.decode("LEHV6nWB2yk8pyo0adR*.7kCMdnj", 16, 12).unwrap();
/// assert_eq!(image.as_bytes().len(), 16 * 12 * 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoder {
    punch: f64,
    strategy: ComputeStrategy,
    layout: PixelLayout,
    validation: Validation,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            punch: 1.0,
            strategy: ComputeStrategy::default(),
            layout: PixelLayout::default(),
            validation: Validation::default(),
        }
    }
}

impl Decoder {
    /// A decoder with punch 1, scalar strategy, RGB output and permissive parsing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contrast factor applied to the AC terms (`> 1` boosts, `< 1` flattens).
    pub fn with_punch(mut self, punch: f64) -> Self {
        self.punch = punch;
        self
    }

    /// Select the execution strategy for the basis transform.
    pub fn with_strategy(mut self, strategy: ComputeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Byte order of the produced pixels.
    pub fn with_layout(mut self, layout: PixelLayout) -> Self {
        self.layout = layout;
        self
    }

    /// How unknown characters in the hash are treated.
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// The configured punch.
    pub fn punch(&self) -> f64 {
        self.punch
    }

    /// The configured strategy.
    pub fn strategy(&self) -> ComputeStrategy {
        self.strategy
    }

    /// Reconstruct a `width` x `height` image from `blurhash`.
    ///
    /// # Errors
    ///
    /// [`BlurhashError::InvalidDimensions`] for zero or oversized targets,
    /// [`BlurhashError::MalformedHash`] for a hash that does not parse.
    pub fn decode(
        &self,
        blurhash: &str,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer<'static>, BlurhashError> {
        check_dimensions(width, height)?;
        let coefficients = hash::parse(blurhash, self.punch, self.validation)?;
        log::debug!(
            "decoding {}x{} components into {}x{} {:?} image ({:?})",
            coefficients.grid().x(),
            coefficients.grid().y(),
            width,
            height,
            self.layout,
            self.strategy
        );

        let linear = engine::inverse(&coefficients, width, height, self.strategy)?;
        let bpp = self.layout.bytes_per_pixel();
        let mut data = vec![0u8; linear.len() * bpp];
        for (dst, px) in data.chunks_exact_mut(bpp).zip(&linear) {
            self.layout.store(
                dst,
                [
                    linear_to_srgb(px[0]),
                    linear_to_srgb(px[1]),
                    linear_to_srgb(px[2]),
                ],
            );
        }
        PixelBuffer::from_vec(data, width, height, self.layout)
    }

    /// Decode straight into any [`ImageSink`].
    pub fn decode_into<S: ImageSink>(
        &self,
        blurhash: &str,
        width: u32,
        height: u32,
    ) -> Result<S, BlurhashError> {
        S::from_pixel_buffer(self.decode(blurhash, width, height)?)
    }
}

/// Extract the number of X and Y components from a BlurHash string.
///
/// # Errors
///
/// Returns [`BlurhashError::MalformedHash`] if the BlurHash is shorter than
/// six characters or its size flag is out of range.
///
/// # Examples
///
/// ```
/// use blurhash_engine::components;
/// let (cx, cy) = components("LEHV6nWB2yk8pyo0adR*.7kCMdnj").unwrap();
/// assert_eq!((cx, cy), (4, 3));
/// ```
pub fn components(blurhash: &str) -> Result<(u32, u32), BlurhashError> {
    let grid = hash::components(blurhash)?;
    Ok((grid.x(), grid.y()))
}

/// Decode a BlurHash string into a flat RGB byte array.
///
/// # Arguments
///
/// * `blurhash` - The BlurHash string to decode.
/// * `width` - The desired output image width.
/// * `height` - The desired output image height.
/// * `punch` - Factor to boost/reduce contrast of the decoded image (1.0 = normal).
///
/// # Returns
///
/// A `Vec<u8>` of length `width * height * 3` containing RGB pixel data in
/// row-major order.
///
/// # Errors
///
/// Returns an error if the BlurHash string is malformed or the dimensions are
/// zero or above [`crate::MAX_DIMENSION`].
///
/// # Examples
///
/// ```
/// use blurhash_engine::decode;
/// let pixels = decode("LEHV6nWB2yk8pyo0adR*.7kCMdnj", 32, 32, 1.0).unwrap();
/// assert_eq!(pixels.len(), 32 * 32 * 3);
/// ```
pub fn decode(
    blurhash: &str,
    width: u32,
    height: u32,
    punch: f64,
) -> Result<Vec<u8>, BlurhashError> {
    let image = Decoder::new()
        .with_punch(punch)
        .decode(blurhash, width, height)?;
    Ok(image.into_vec())
}
