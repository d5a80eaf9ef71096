//! Reference nested-loop transform in f64.
//!
//! Summation order is fixed: output cells row-major over `(j, i)`, and for
//! each cell the input pixels with `x` outer and `y` inner. Results from this
//! module are bit-reproducible and serve as the oracle for the other
//! strategies.

use super::{normalization, CosineTable};
use crate::grid::{CoefficientGrid, Rgb};

pub(super) fn forward(linear: &[Rgb], cos_x: &CosineTable, cos_y: &CosineTable) -> Vec<Rgb> {
    let width = cos_x.len();
    let height = cos_y.len();
    let scale = 1.0 / (width as f64 * height as f64);

    let mut values = Vec::with_capacity(cos_x.frequencies() * cos_y.frequencies());
    for j in 0..cos_y.frequencies() {
        let cy_row = cos_y.row(j);
        for i in 0..cos_x.frequencies() {
            let cx_row = cos_x.row(i);
            let norm = normalization(i, j);
            let mut sum = [0.0f64; 3];
            for (x, &cx) in cx_row.iter().enumerate() {
                for (y, &cy) in cy_row.iter().enumerate() {
                    let basis = norm * cx * cy;
                    let px = &linear[y * width + x];
                    sum[0] += basis * px[0];
                    sum[1] += basis * px[1];
                    sum[2] += basis * px[2];
                }
            }
            values.push([sum[0] * scale, sum[1] * scale, sum[2] * scale]);
        }
    }
    values
}

/// Reconstruct output row `y` into `out` (one entry per column).
pub(super) fn reconstruct_row(
    coefficients: &CoefficientGrid,
    cos_x: &CosineTable,
    cos_y: &CosineTable,
    y: usize,
    out: &mut [Rgb],
) {
    let grid = coefficients.grid();
    let (nx, ny) = (grid.x() as usize, grid.y() as usize);
    for (x, px) in out.iter_mut().enumerate() {
        let mut acc = [0.0f64; 3];
        for j in 0..ny {
            let cy = cos_y.at(j, y);
            for i in 0..nx {
                let basis = cos_x.at(i, x) * cy;
                let c = coefficients.get(i, j);
                acc[0] += c[0] * basis;
                acc[1] += c[1] * basis;
                acc[2] += c[2] * basis;
            }
        }
        *px = acc;
    }
}

pub(super) fn inverse(
    coefficients: &CoefficientGrid,
    cos_x: &CosineTable,
    cos_y: &CosineTable,
) -> Vec<Rgb> {
    let width = cos_x.len();
    let mut pixels = vec![[0.0f64; 3]; width * cos_y.len()];
    for (y, row) in pixels.chunks_exact_mut(width).enumerate() {
        reconstruct_row(coefficients, cos_x, cos_y, y, row);
    }
    pixels
}
