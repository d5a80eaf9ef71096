//! Separable two-pass transform over planar f32 channels.
//!
//! The forward pass first collapses every pixel row against each horizontal
//! cosine (`partial[i][y]`), then collapses those columns against each vertical
//! cosine. That is `O(W*H*nx + H*nx*ny)` instead of `O(W*H*nx*ny)`, and both
//! passes are contiguous dot products handled by [`crate::simd`].

use super::{normalization, CosineTable};
use crate::color::srgb_to_linear_f32;
use crate::grid::{CoefficientGrid, Rgb};
use crate::pixels::PixelBuffer;
use crate::simd;

/// Linear RGB split into three row-major planes.
struct Planes {
    r: Vec<f32>,
    g: Vec<f32>,
    b: Vec<f32>,
}

impl Planes {
    fn from_pixels(pixels: &PixelBuffer<'_>) -> Self {
        let len = pixels.width() as usize * pixels.height() as usize;
        let mut planes = Self {
            r: Vec::with_capacity(len),
            g: Vec::with_capacity(len),
            b: Vec::with_capacity(len),
        };
        let bpp = pixels.layout().bytes_per_pixel();
        let [ro, go, bo] = pixels.layout().rgb_offsets();
        for y in 0..pixels.height() {
            for px in pixels.row(y).chunks_exact(bpp) {
                planes.r.push(srgb_to_linear_f32(px[ro]));
                planes.g.push(srgb_to_linear_f32(px[go]));
                planes.b.push(srgb_to_linear_f32(px[bo]));
            }
        }
        planes
    }

    fn zeroed(len: usize) -> Self {
        Self {
            r: vec![0.0; len],
            g: vec![0.0; len],
            b: vec![0.0; len],
        }
    }
}

pub(super) fn forward(
    pixels: &PixelBuffer<'_>,
    cos_x: &CosineTable,
    cos_y: &CosineTable,
) -> Vec<Rgb> {
    let width = cos_x.len();
    let height = cos_y.len();
    let (nx, ny) = (cos_x.frequencies(), cos_y.frequencies());
    let cx = cos_x.to_f32();
    let cy = cos_y.to_f32();
    let planes = Planes::from_pixels(pixels);

    // Pass 1: partial[i * height + y] = sum_x cos_x[i][x] * pixel(x, y)
    let mut partial = Planes::zeroed(nx * height);
    for y in 0..height {
        let row = y * width..(y + 1) * width;
        let (r, g, b) = (&planes.r[row.clone()], &planes.g[row.clone()], &planes.b[row]);
        for i in 0..nx {
            let [sr, sg, sb] = simd::dot_product_3ch(&cx[i * width..(i + 1) * width], r, g, b);
            let idx = i * height + y;
            partial.r[idx] = sr;
            partial.g[idx] = sg;
            partial.b[idx] = sb;
        }
    }

    // Pass 2: coeff(i, j) = norm * scale * sum_y cos_y[j][y] * partial[i][y]
    let scale = 1.0 / (width as f64 * height as f64);
    let mut values = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        let cy_row = &cy[j * height..(j + 1) * height];
        for i in 0..nx {
            let col = i * height..(i + 1) * height;
            let sums = simd::dot_product_3ch(
                cy_row,
                &partial.r[col.clone()],
                &partial.g[col.clone()],
                &partial.b[col],
            );
            let factor = normalization(i, j) * scale;
            values.push([
                sums[0] as f64 * factor,
                sums[1] as f64 * factor,
                sums[2] as f64 * factor,
            ]);
        }
    }
    values
}

pub(super) fn inverse(
    coefficients: &CoefficientGrid,
    cos_x: &CosineTable,
    cos_y: &CosineTable,
) -> Vec<Rgb> {
    let width = cos_x.len();
    let height = cos_y.len();
    let grid = coefficients.grid();
    let (nx, ny) = (grid.x() as usize, grid.y() as usize);
    let cx = cos_x.to_f32();

    // Pass 1: partial[j * width + x] = sum_i coeff(i, j) * cos_x[i][x]
    let mut partial = Planes::zeroed(ny * width);
    for j in 0..ny {
        for i in 0..nx {
            let c = coefficients.get(i, j);
            let (cr, cg, cb) = (c[0] as f32, c[1] as f32, c[2] as f32);
            let cx_row = &cx[i * width..(i + 1) * width];
            let base = j * width;
            for (x, &cos) in cx_row.iter().enumerate() {
                partial.r[base + x] += cr * cos;
                partial.g[base + x] += cg * cos;
                partial.b[base + x] += cb * cos;
            }
        }
    }

    // Pass 2: pixel(x, y) = sum_j cos_y[j][y] * partial[j][x]
    let mut pixels = Vec::with_capacity(width * height);
    let mut cos_y_vals = vec![0.0f32; ny];
    let mut row = vec![[0.0f32; 3]; width];
    for y in 0..height {
        for (j, v) in cos_y_vals.iter_mut().enumerate() {
            *v = cos_y.at(j, y) as f32;
        }
        simd::accumulate_row(&cos_y_vals, &partial.r, &partial.g, &partial.b, &mut row);
        pixels.extend(
            row.iter()
                .map(|px| [px[0] as f64, px[1] as f64, px[2] as f64]),
        );
    }
    pixels
}
