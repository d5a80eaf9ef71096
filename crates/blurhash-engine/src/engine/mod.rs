//! The basis transform: pixels to DCT coefficients and back.
//!
//! Forward (encode), for every cell `(i, j)` of the component grid:
//!
//! ```text
//! coeff(i, j) = norm * scale * sum_{x,y} cos(PI*i*x/W) * cos(PI*j*y/H) * linear(x, y)
//! ```
//!
//! with `norm = 1` for the DC cell and `2` otherwise, and `scale = 1 / (W * H)`.
//! Inverse (decode) sums `coeff(i, j) * cos(PI*i*x/W) * cos(PI*j*y/H)` over the
//! grid for every output pixel, at any requested resolution.
//!
//! Only the double summation differs between [`ComputeStrategy`] variants; the
//! cosine tables and pixel linearization are shared.

mod parallel;
mod scalar;
mod vectorized;

use std::f64::consts::PI;

use crate::color::srgb_to_linear;
use crate::error::BlurhashError;
use crate::grid::{CoefficientGrid, ComponentGrid, Rgb};
use crate::pixels::{check_dimensions, PixelBuffer};

/// How the double summation is executed.
///
/// All strategies honour the same numerical contract. `Scalar` is the
/// bit-reproducible reference; the others agree with it to well within 1e-3
/// per coefficient channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComputeStrategy {
    /// Nested loops in the reference summation order.
    #[default]
    Scalar,
    /// Separable two-pass transform over planar f32 channels using SIMD kernels.
    Vectorized,
    /// Independent tiles evaluated on the rayon pool, reduced in tile order.
    DataParallel,
}

/// `cos(PI * k * n / len)` for every frequency `k` and sample `n`.
///
/// Built once per call and shared by every cell, so all strategies read
/// identical basis values.
#[derive(Debug, Clone)]
pub struct CosineTable {
    len: usize,
    values: Vec<f64>,
}

impl CosineTable {
    /// Tabulate `components` frequencies over `len` samples.
    pub fn new(components: usize, len: usize) -> Self {
        let lenf = len as f64;
        let mut values = Vec::with_capacity(components * len);
        for k in 0..components {
            values.extend((0..len).map(|n| (PI * k as f64 * n as f64 / lenf).cos()));
        }
        Self { len, values }
    }

    /// Number of samples per frequency.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the table has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of tabulated frequencies.
    #[inline]
    pub fn frequencies(&self) -> usize {
        if self.len == 0 {
            0
        } else {
            self.values.len() / self.len
        }
    }

    /// All samples of frequency `k`.
    #[inline]
    pub fn row(&self, k: usize) -> &[f64] {
        &self.values[k * self.len..(k + 1) * self.len]
    }

    /// `cos(PI * k * n / len)`.
    #[inline]
    pub fn at(&self, k: usize, n: usize) -> f64 {
        self.values[k * self.len + n]
    }

    /// The table narrowed to f32, same layout.
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

/// Convert a pixel buffer to linear RGB, row-major (`y * width + x`).
pub(crate) fn linearize(pixels: &PixelBuffer<'_>) -> Vec<Rgb> {
    let bpp = pixels.layout().bytes_per_pixel();
    let [r, g, b] = pixels.layout().rgb_offsets();
    let mut linear = Vec::with_capacity(pixels.width() as usize * pixels.height() as usize);
    for y in 0..pixels.height() {
        linear.extend(pixels.row(y).chunks_exact(bpp).map(|px| {
            [
                srgb_to_linear(px[r]),
                srgb_to_linear(px[g]),
                srgb_to_linear(px[b]),
            ]
        }));
    }
    linear
}

/// Normalization factor for cell `(i, j)`.
#[inline]
pub(crate) fn normalization(i: usize, j: usize) -> f64 {
    if i == 0 && j == 0 {
        1.0
    } else {
        2.0
    }
}

/// Decompose `pixels` into `grid.len()` coefficients.
///
/// # Errors
///
/// [`BlurhashError::InvalidDimensions`] for zero or oversized images.
pub fn forward(
    pixels: &PixelBuffer<'_>,
    grid: ComponentGrid,
    strategy: ComputeStrategy,
) -> Result<CoefficientGrid, BlurhashError> {
    check_dimensions(pixels.width(), pixels.height())?;
    let width = pixels.width() as usize;
    let height = pixels.height() as usize;

    let cos_x = CosineTable::new(grid.x() as usize, width);
    let cos_y = CosineTable::new(grid.y() as usize, height);
    log::trace!(
        "forward transform: {}x{} pixels, {}x{} cells, {:?}",
        width,
        height,
        grid.x(),
        grid.y(),
        strategy
    );

    let values = match strategy {
        ComputeStrategy::Scalar => scalar::forward(&linearize(pixels), &cos_x, &cos_y),
        ComputeStrategy::Vectorized => vectorized::forward(pixels, &cos_x, &cos_y),
        ComputeStrategy::DataParallel => parallel::forward(&linearize(pixels), &cos_x, &cos_y),
    };
    Ok(CoefficientGrid::new(grid, values))
}

/// Reconstruct a `width` x `height` image in linear RGB, row-major.
///
/// # Errors
///
/// [`BlurhashError::InvalidDimensions`] for zero or oversized targets.
pub fn inverse(
    coefficients: &CoefficientGrid,
    width: u32,
    height: u32,
    strategy: ComputeStrategy,
) -> Result<Vec<Rgb>, BlurhashError> {
    check_dimensions(width, height)?;
    let grid = coefficients.grid();
    let cos_x = CosineTable::new(grid.x() as usize, width as usize);
    let cos_y = CosineTable::new(grid.y() as usize, height as usize);
    log::trace!(
        "inverse transform: {}x{} cells to {}x{} pixels, {:?}",
        grid.x(),
        grid.y(),
        width,
        height,
        strategy
    );

    let pixels = match strategy {
        ComputeStrategy::Scalar => scalar::inverse(coefficients, &cos_x, &cos_y),
        ComputeStrategy::Vectorized => vectorized::inverse(coefficients, &cos_x, &cos_y),
        ComputeStrategy::DataParallel => parallel::inverse(coefficients, &cos_x, &cos_y),
    };
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::PixelLayout;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(((x + y) * 7 % 256) as u8);
            }
        }
        pixels
    }

    #[test]
    fn test_cosine_table_values() {
        let table = CosineTable::new(3, 4);
        assert_eq!(table.len(), 4);
        assert_eq!(table.frequencies(), 3);
        assert!(table.row(0).iter().all(|&v| v == 1.0));
        assert!((table.at(1, 2) - (PI / 2.0).cos()).abs() < 1e-15);
        assert!((table.at(2, 1) - (PI / 2.0).cos()).abs() < 1e-15);
        assert!((table.at(2, 2) + 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_linearize_honours_stride_and_layout() {
        // 1x2 BGRA with two bytes of padding after the first row.
        let data = [0u8, 0, 255, 9, 7, 7, 255, 0, 0, 9];
        let buf = PixelBuffer::with_stride(&data, 1, 2, 6, PixelLayout::Bgra).unwrap();
        let linear = linearize(&buf);
        assert_eq!(linear.len(), 2);
        let one = srgb_to_linear(255);
        assert_eq!(linear[0], [one, 0.0, 0.0]);
        assert_eq!(linear[1], [0.0, 0.0, one]);
    }

    /// Coefficient of a flat image with linear value `v`: the basis is
    /// separable, so each cell is the product of its two cosine row sums.
    fn flat_coefficient(
        v: f64,
        cos_x: &CosineTable,
        cos_y: &CosineTable,
        i: usize,
        j: usize,
    ) -> f64 {
        let sum_x: f64 = cos_x.row(i).iter().sum();
        let sum_y: f64 = cos_y.row(j).iter().sum();
        normalization(i, j) * v * sum_x * sum_y / (cos_x.len() * cos_y.len()) as f64
    }

    #[test]
    fn test_solid_image_matches_closed_form() {
        let data = vec![200u8; 8 * 6 * 3];
        let buf = PixelBuffer::new(&data, 8, 6, PixelLayout::Rgb).unwrap();
        let grid = ComponentGrid::new(4, 3).unwrap();
        let (cos_x, cos_y) = (CosineTable::new(4, 8), CosineTable::new(3, 6));
        let v = srgb_to_linear(200);
        for strategy in [
            ComputeStrategy::Scalar,
            ComputeStrategy::Vectorized,
            ComputeStrategy::DataParallel,
        ] {
            let coeffs = forward(&buf, grid, strategy).unwrap();
            let tolerance = if strategy == ComputeStrategy::Vectorized { 1e-5 } else { 1e-12 };
            assert!(coeffs.dc().iter().all(|c| (c - v).abs() < tolerance));
            for j in 0..3 {
                for i in 0..4 {
                    let expected = flat_coefficient(v, &cos_x, &cos_y, i, j);
                    for c in coeffs.get(i, j) {
                        assert!(
                            (c - expected).abs() < tolerance,
                            "{strategy:?} cell ({i}, {j}): {c} vs {expected}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_strategies_agree_forward() {
        let data = gradient(37, 29);
        let buf = PixelBuffer::new(&data, 37, 29, PixelLayout::Rgb).unwrap();
        let grid = ComponentGrid::new(5, 4).unwrap();
        let reference = forward(&buf, grid, ComputeStrategy::Scalar).unwrap();
        for strategy in [ComputeStrategy::Vectorized, ComputeStrategy::DataParallel] {
            let other = forward(&buf, grid, strategy).unwrap();
            let diff = reference.max_difference(&other).unwrap();
            assert!(diff < 1e-3, "{strategy:?} differs by {diff}");
        }
    }

    #[test]
    fn test_strategies_agree_inverse() {
        let data = gradient(16, 16);
        let buf = PixelBuffer::new(&data, 16, 16, PixelLayout::Rgb).unwrap();
        let coeffs = forward(&buf, ComponentGrid::new(4, 4).unwrap(), ComputeStrategy::Scalar)
            .unwrap();
        let reference = inverse(&coeffs, 23, 11, ComputeStrategy::Scalar).unwrap();
        for strategy in [ComputeStrategy::Vectorized, ComputeStrategy::DataParallel] {
            let other = inverse(&coeffs, 23, 11, strategy).unwrap();
            assert_eq!(other.len(), reference.len());
            for (a, b) in reference.iter().zip(&other) {
                for c in 0..3 {
                    assert!((a[c] - b[c]).abs() < 1e-4, "{strategy:?}: {} vs {}", a[c], b[c]);
                }
            }
        }
    }

    #[test]
    fn test_inverse_rejects_zero_target() {
        let coeffs = CoefficientGrid::new(ComponentGrid::new(1, 1).unwrap(), vec![[0.5; 3]]);
        for strategy in [
            ComputeStrategy::Scalar,
            ComputeStrategy::Vectorized,
            ComputeStrategy::DataParallel,
        ] {
            assert!(matches!(
                inverse(&coeffs, 0, 4, strategy),
                Err(BlurhashError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn test_dc_only_inverse_is_flat() {
        let coeffs = CoefficientGrid::new(ComponentGrid::new(1, 1).unwrap(), vec![[0.25, 0.5, 0.75]]);
        let pixels = inverse(&coeffs, 5, 3, ComputeStrategy::Scalar).unwrap();
        assert!(pixels.iter().all(|&p| p == [0.25, 0.5, 0.75]));
    }
}
