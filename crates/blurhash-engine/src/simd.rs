//! SIMD kernels for the vectorized execution strategy.
//!
//! Both kernels operate on planar f32 channels. With the `simd` feature they
//! dispatch to AVX2+FMA on x86_64 (runtime detected) or NEON on aarch64, and
//! fall back to scalar loops everywhere else.

// ---------------------------------------------------------------------------
// Three-channel dot product (forward transform, both passes)
// ---------------------------------------------------------------------------

/// Compute three dot products against one cosine row.
///
/// Returns `[sum_r, sum_g, sum_b]` where `sum_c = sum_k(cos_row[k] * c_row[k])`
/// over the first `cos_row.len()` elements.
#[inline]
pub fn dot_product_3ch(cos_row: &[f32], r_row: &[f32], g_row: &[f32], b_row: &[f32]) -> [f32; 3] {
    let len = cos_row.len();
    assert!(
        r_row.len() >= len && g_row.len() >= len && b_row.len() >= len,
        "channel rows shorter than the cosine row"
    );

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        // NEON is always available on aarch64.
        unsafe { dot_product_3ch_neon(cos_row, r_row, g_row, b_row, len) }
    }

    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            unsafe { dot_product_3ch_avx2(cos_row, r_row, g_row, b_row, len) }
        } else {
            dot_product_3ch_scalar(cos_row, r_row, g_row, b_row, len)
        }
    }

    #[cfg(not(all(
        feature = "simd",
        any(target_arch = "aarch64", target_arch = "x86_64")
    )))]
    {
        dot_product_3ch_scalar(cos_row, r_row, g_row, b_row, len)
    }
}

#[cfg_attr(all(feature = "simd", target_arch = "aarch64"), allow(dead_code))]
#[inline]
fn dot_product_3ch_scalar(
    cos_row: &[f32],
    r_row: &[f32],
    g_row: &[f32],
    b_row: &[f32],
    len: usize,
) -> [f32; 3] {
    let mut sums = [0.0f32; 3];
    for k in 0..len {
        let c = cos_row[k];
        sums[0] += c * r_row[k];
        sums[1] += c * g_row[k];
        sums[2] += c * b_row[k];
    }
    sums
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
#[target_feature(enable = "neon")]
unsafe fn dot_product_3ch_neon(
    cos_row: &[f32],
    r_row: &[f32],
    g_row: &[f32],
    b_row: &[f32],
    len: usize,
) -> [f32; 3] {
    use std::arch::aarch64::*;

    let cp = cos_row.as_ptr();
    let rp = r_row.as_ptr();
    let gp = g_row.as_ptr();
    let bp = b_row.as_ptr();

    let mut acc_r = vdupq_n_f32(0.0);
    let mut acc_g = vdupq_n_f32(0.0);
    let mut acc_b = vdupq_n_f32(0.0);

    let chunks = len / 4;
    let tail_start = chunks * 4;

    for c in 0..chunks {
        let offset = c * 4;
        let cv = vld1q_f32(cp.add(offset));
        acc_r = vfmaq_f32(acc_r, cv, vld1q_f32(rp.add(offset)));
        acc_g = vfmaq_f32(acc_g, cv, vld1q_f32(gp.add(offset)));
        acc_b = vfmaq_f32(acc_b, cv, vld1q_f32(bp.add(offset)));
    }

    let mut sums = [vaddvq_f32(acc_r), vaddvq_f32(acc_g), vaddvq_f32(acc_b)];
    for k in tail_start..len {
        let c = *cp.add(k);
        sums[0] += c * *rp.add(k);
        sums[1] += c * *gp.add(k);
        sums[2] += c * *bp.add(k);
    }
    sums
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn dot_product_3ch_avx2(
    cos_row: &[f32],
    r_row: &[f32],
    g_row: &[f32],
    b_row: &[f32],
    len: usize,
) -> [f32; 3] {
    use std::arch::x86_64::*;

    let cp = cos_row.as_ptr();
    let rp = r_row.as_ptr();
    let gp = g_row.as_ptr();
    let bp = b_row.as_ptr();

    let mut acc_r = _mm256_setzero_ps();
    let mut acc_g = _mm256_setzero_ps();
    let mut acc_b = _mm256_setzero_ps();

    let chunks = len / 8;
    let tail_start = chunks * 8;

    for c in 0..chunks {
        let offset = c * 8;
        let cv = _mm256_loadu_ps(cp.add(offset));
        acc_r = _mm256_fmadd_ps(cv, _mm256_loadu_ps(rp.add(offset)), acc_r);
        acc_g = _mm256_fmadd_ps(cv, _mm256_loadu_ps(gp.add(offset)), acc_g);
        acc_b = _mm256_fmadd_ps(cv, _mm256_loadu_ps(bp.add(offset)), acc_b);
    }

    let mut sums = [hsum_avx(acc_r), hsum_avx(acc_g), hsum_avx(acc_b)];
    for k in tail_start..len {
        let c = *cp.add(k);
        sums[0] += c * *rp.add(k);
        sums[1] += c * *gp.add(k);
        sums[2] += c * *bp.add(k);
    }
    sums
}

/// Horizontal sum of the eight lanes of `v`.
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
#[target_feature(enable = "avx")]
unsafe fn hsum_avx(v: std::arch::x86_64::__m256) -> f32 {
    use std::arch::x86_64::*;

    let hi = _mm256_extractf128_ps(v, 1);
    let lo = _mm256_castps256_ps128(v);
    let sum128 = _mm_add_ps(lo, hi);
    let shuf = _mm_movehdup_ps(sum128);
    let sums = _mm_add_ps(sum128, shuf);
    let shuf2 = _mm_movehl_ps(sums, sums);
    _mm_cvtss_f32(_mm_add_ss(sums, shuf2))
}

// ---------------------------------------------------------------------------
// Row accumulation (inverse transform, second pass)
// ---------------------------------------------------------------------------

/// For each `x` in `0..out.len()`, compute
///   `out[x][c] = sum_j(cos_y_vals[j] * partial_c[j * width + x])`
/// where `width == out.len()` and `partial_c` are planar `[num_j][width]` arrays.
#[inline]
pub fn accumulate_row(
    cos_y_vals: &[f32],
    partial_r: &[f32],
    partial_g: &[f32],
    partial_b: &[f32],
    out: &mut [[f32; 3]],
) {
    let width = out.len();
    let needed = cos_y_vals.len() * width;
    assert!(
        partial_r.len() >= needed && partial_g.len() >= needed && partial_b.len() >= needed,
        "partial planes shorter than num_j * width"
    );

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        unsafe { accumulate_row_neon(cos_y_vals, partial_r, partial_g, partial_b, out) }
    }

    #[cfg(not(all(feature = "simd", target_arch = "aarch64")))]
    {
        accumulate_row_scalar(cos_y_vals, partial_r, partial_g, partial_b, out)
    }
}

#[cfg_attr(all(feature = "simd", target_arch = "aarch64"), allow(dead_code))]
#[inline]
fn accumulate_row_scalar(
    cos_y_vals: &[f32],
    partial_r: &[f32],
    partial_g: &[f32],
    partial_b: &[f32],
    out: &mut [[f32; 3]],
) {
    let width = out.len();
    for (x, px) in out.iter_mut().enumerate() {
        let mut acc = [0.0f32; 3];
        for (j, &cy) in cos_y_vals.iter().enumerate() {
            let idx = j * width + x;
            acc[0] += cy * partial_r[idx];
            acc[1] += cy * partial_g[idx];
            acc[2] += cy * partial_b[idx];
        }
        *px = acc;
    }
}

/// Vectorized over x (four pixels at a time), with the j loop as a scalar broadcast.
#[cfg(all(feature = "simd", target_arch = "aarch64"))]
#[target_feature(enable = "neon")]
unsafe fn accumulate_row_neon(
    cos_y_vals: &[f32],
    partial_r: &[f32],
    partial_g: &[f32],
    partial_b: &[f32],
    out: &mut [[f32; 3]],
) {
    use std::arch::aarch64::*;

    let width = out.len();
    let chunks = width / 4;
    let tail_start = chunks * 4;

    for chunk in 0..chunks {
        let x = chunk * 4;
        let mut acc_r = vdupq_n_f32(0.0);
        let mut acc_g = vdupq_n_f32(0.0);
        let mut acc_b = vdupq_n_f32(0.0);

        for (j, &cy) in cos_y_vals.iter().enumerate() {
            let cyv = vdupq_n_f32(cy);
            let base = j * width + x;
            acc_r = vfmaq_f32(acc_r, cyv, vld1q_f32(partial_r.as_ptr().add(base)));
            acc_g = vfmaq_f32(acc_g, cyv, vld1q_f32(partial_g.as_ptr().add(base)));
            acc_b = vfmaq_f32(acc_b, cyv, vld1q_f32(partial_b.as_ptr().add(base)));
        }

        let mut r_arr = [0.0f32; 4];
        let mut g_arr = [0.0f32; 4];
        let mut b_arr = [0.0f32; 4];
        vst1q_f32(r_arr.as_mut_ptr(), acc_r);
        vst1q_f32(g_arr.as_mut_ptr(), acc_g);
        vst1q_f32(b_arr.as_mut_ptr(), acc_b);

        for lane in 0..4 {
            out[x + lane] = [r_arr[lane], g_arr[lane], b_arr[lane]];
        }
    }

    for x in tail_start..width {
        let mut acc = [0.0f32; 3];
        for (j, &cy) in cos_y_vals.iter().enumerate() {
            let idx = j * width + x;
            acc[0] += cy * partial_r[idx];
            acc[1] += cy * partial_g[idx];
            acc[2] += cy * partial_b[idx];
        }
        out[x] = acc;
    }
}
