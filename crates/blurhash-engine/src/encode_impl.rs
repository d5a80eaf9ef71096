//! BlurHash encoding: convert an image into a compact BlurHash string.
//!
//! The encoder projects the image onto a small grid of cosine basis functions
//! and quantizes the resulting coefficients into a base83 string.

use crate::engine::{self, ComputeStrategy};
use crate::error::BlurhashError;
use crate::grid::{CoefficientGrid, ComponentGrid};
use crate::hash;
use crate::pixels::{ImageSource, PixelBuffer, PixelLayout};

/// A configured encoder.
///
/// # Examples
///
/// ```
/// use blurhash_engine::{ComputeStrategy, Encoder, PixelBuffer, PixelLayout};
///
/// let pixels = vec![128u8; 8 * 8 * 3];
/// let image = PixelBuffer::new(&pixels, 8, 8, PixelLayout::Rgb).unwrap();
/// let encoder = Encoder::new(4, 3).unwrap().with_strategy(ComputeStrategy::Vectorized);
/// let hash = encoder.encode(&image).unwrap();
/// assert_eq!(hash.len(), 28);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    components: ComponentGrid,
    strategy: ComputeStrategy,
}

impl Encoder {
    /// Create an encoder sampling `components_x` by `components_y` cells.
    ///
    /// # Errors
    ///
    /// [`BlurhashError::InvalidComponents`] if either count is outside `1..=9`.
    pub fn new(components_x: u32, components_y: u32) -> Result<Self, BlurhashError> {
        Ok(Self {
            components: ComponentGrid::new(components_x, components_y)?,
            strategy: ComputeStrategy::default(),
        })
    }

    /// Select the execution strategy for the basis transform.
    pub fn with_strategy(mut self, strategy: ComputeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The component grid.
    pub fn components(&self) -> ComponentGrid {
        self.components
    }

    /// The execution strategy.
    pub fn strategy(&self) -> ComputeStrategy {
        self.strategy
    }

    /// Compute the unquantized coefficients of `pixels`.
    pub fn coefficients(&self, pixels: &PixelBuffer<'_>) -> Result<CoefficientGrid, BlurhashError> {
        engine::forward(pixels, self.components, self.strategy)
    }

    /// Encode `pixels` into a hash of `4 + 2 * x * y` characters.
    ///
    /// # Errors
    ///
    /// [`BlurhashError::InvalidDimensions`] for zero or oversized images.
    pub fn encode(&self, pixels: &PixelBuffer<'_>) -> Result<String, BlurhashError> {
        log::debug!(
            "encoding {}x{} {:?} image with {}x{} components ({:?})",
            pixels.width(),
            pixels.height(),
            pixels.layout(),
            self.components.x(),
            self.components.y(),
            self.strategy
        );
        let coefficients = self.coefficients(pixels)?;
        hash::serialize(&coefficients)
    }

    /// Encode any [`ImageSource`].
    pub fn encode_source<S: ImageSource + ?Sized>(&self, source: &S) -> Result<String, BlurhashError> {
        self.encode(&source.pixel_buffer()?)
    }
}

/// Encode a tightly packed RGB image into a BlurHash string.
///
/// # Arguments
///
/// * `pixels` - Flat RGB byte array in row-major order (3 bytes per pixel).
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
/// * `components_x` - Number of horizontal components (1..=9).
/// * `components_y` - Number of vertical components (1..=9).
///
/// # Limits
///
/// Inputs are capped at [`crate::MAX_DIMENSION`] (10000) pixels on each axis.
/// Downscale larger images before encoding.
///
/// # Errors
///
/// Returns an error if the component counts are out of range, the dimensions
/// are zero or above [`crate::MAX_DIMENSION`], or the buffer is shorter than
/// `width * height * 3`.
///
/// # Examples
///
/// ```
/// use blurhash_engine::encode;
/// // A 2x2 red image
/// let pixels = [255, 0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0];
/// let hash = encode(&pixels, 2, 2, 4, 3).unwrap();
/// assert_eq!(hash.len(), 28);
/// ```
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    components_x: u32,
    components_y: u32,
) -> Result<String, BlurhashError> {
    let encoder = Encoder::new(components_x, components_y)?;
    let image = PixelBuffer::new(pixels, width, height, PixelLayout::Rgb)?;
    encoder.encode(&image)
}
