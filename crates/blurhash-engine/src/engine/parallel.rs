//! Tiled transform evaluated on the rayon pool.
//!
//! Forward: the input is cut into bands of [`TILE_ROWS`] rows. Each band
//! accumulates its own partial sum for every cell with no shared state, and
//! the partials are reduced on the calling thread in band order. Inverse:
//! output rows are independent and reuse the scalar row kernel, so the result
//! is identical to [`super::scalar::inverse`].
//!
//! Without the `parallel` feature the same tiling runs sequentially.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{normalization, scalar, CosineTable};
use crate::grid::{CoefficientGrid, Rgb};

/// Input rows per forward tile.
pub(super) const TILE_ROWS: usize = 16;

/// Unscaled partial sums of every cell over rows `y0..y1`.
fn band_sums(
    linear: &[Rgb],
    cos_x: &CosineTable,
    cos_y: &CosineTable,
    y0: usize,
    y1: usize,
) -> Vec<Rgb> {
    let width = cos_x.len();
    let mut sums = Vec::with_capacity(cos_x.frequencies() * cos_y.frequencies());
    for j in 0..cos_y.frequencies() {
        let cy_band = &cos_y.row(j)[y0..y1];
        for i in 0..cos_x.frequencies() {
            let norm = normalization(i, j);
            let mut sum = [0.0f64; 3];
            for (x, &cx) in cos_x.row(i).iter().enumerate() {
                for (dy, &cy) in cy_band.iter().enumerate() {
                    let basis = norm * cx * cy;
                    let px = &linear[(y0 + dy) * width + x];
                    sum[0] += basis * px[0];
                    sum[1] += basis * px[1];
                    sum[2] += basis * px[2];
                }
            }
            sums.push(sum);
        }
    }
    sums
}

pub(super) fn forward(linear: &[Rgb], cos_x: &CosineTable, cos_y: &CosineTable) -> Vec<Rgb> {
    let width = cos_x.len();
    let height = cos_y.len();
    let bands = (height + TILE_ROWS - 1) / TILE_ROWS;
    log::trace!("data-parallel forward: {bands} band(s) of up to {TILE_ROWS} rows");
    let band = |b: usize| {
        let y0 = b * TILE_ROWS;
        band_sums(linear, cos_x, cos_y, y0, (y0 + TILE_ROWS).min(height))
    };

    #[cfg(feature = "parallel")]
    let partials: Vec<Vec<Rgb>> = (0..bands).into_par_iter().map(band).collect();
    #[cfg(not(feature = "parallel"))]
    let partials: Vec<Vec<Rgb>> = (0..bands).map(band).collect();

    let cells = cos_x.frequencies() * cos_y.frequencies();
    let mut totals = vec![[0.0f64; 3]; cells];
    for partial in &partials {
        for (total, p) in totals.iter_mut().zip(partial) {
            total[0] += p[0];
            total[1] += p[1];
            total[2] += p[2];
        }
    }

    let scale = 1.0 / (width as f64 * height as f64);
    totals
        .into_iter()
        .map(|t| [t[0] * scale, t[1] * scale, t[2] * scale])
        .collect()
}

pub(super) fn inverse(
    coefficients: &CoefficientGrid,
    cos_x: &CosineTable,
    cos_y: &CosineTable,
) -> Vec<Rgb> {
    let width = cos_x.len();
    let mut pixels = vec![[0.0f64; 3]; width * cos_y.len()];

    #[cfg(feature = "parallel")]
    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| scalar::reconstruct_row(coefficients, cos_x, cos_y, y, row));
    #[cfg(not(feature = "parallel"))]
    pixels
        .chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| scalar::reconstruct_row(coefficients, cos_x, cos_y, y, row));

    pixels
}
