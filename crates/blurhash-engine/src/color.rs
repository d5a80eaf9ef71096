//! Color space conversion utilities for sRGB and linear RGB.
//!
//! The sRGB-to-linear direction uses a 256-entry table built once per process
//! from the exact transfer function. The linear-to-sRGB direction evaluates the
//! exact formula with round-half-up truncation so that DC digits match hashes
//! produced by other encoders bit for bit.

use std::sync::OnceLock;

/// Process-wide sRGB-to-linear table, built on first use and never mutated.
static SRGB_TO_LINEAR_LUT: OnceLock<[f64; 256]> = OnceLock::new();

#[inline]
fn srgb_transfer(level: f64) -> f64 {
    let value = level / 255.0;
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

fn build_srgb_to_linear_lut() -> [f64; 256] {
    let mut lut = [0.0f64; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = srgb_transfer(i as f64);
    }
    lut
}

#[inline]
fn srgb_to_linear_lut() -> &'static [f64; 256] {
    SRGB_TO_LINEAR_LUT.get_or_init(build_srgb_to_linear_lut)
}

/// Convert an sRGB byte value (0..=255) to linear RGB (0.0..=1.0).
///
/// # Examples
///
/// ```
/// use blurhash_engine::color::srgb_to_linear;
/// assert!((srgb_to_linear(0) - 0.0).abs() < 1e-10);
/// assert!((srgb_to_linear(255) - 1.0).abs() < 1e-10);
/// ```
#[inline]
pub fn srgb_to_linear(value: u8) -> f64 {
    srgb_to_linear_lut()[value as usize]
}

/// Convert an sRGB level that may exceed 255 to linear RGB.
///
/// Levels above 255 come from DC fields wider than a byte and map past 1.0;
/// the final conversion back to sRGB saturates them.
///
/// # Examples
///
/// ```
/// use blurhash_engine::color::{srgb_level_to_linear, srgb_to_linear};
/// assert_eq!(srgb_level_to_linear(128), srgb_to_linear(128));
/// assert!(srgb_level_to_linear(724) > 1.0);
/// ```
#[inline]
pub fn srgb_level_to_linear(level: u32) -> f64 {
    match u8::try_from(level) {
        Ok(byte) => srgb_to_linear(byte),
        Err(_) => srgb_transfer(level as f64),
    }
}

/// Convert an sRGB byte value (0..=255) to linear RGB as f32.
#[inline]
pub fn srgb_to_linear_f32(value: u8) -> f32 {
    srgb_to_linear(value) as f32
}

/// Convert a linear RGB value to an sRGB byte value (0..=255).
///
/// The input is clamped to \[0.0, 1.0\] first. Rounding is `+ 0.5` followed by
/// truncation. NaN maps to 0.
///
/// # Examples
///
/// ```
/// use blurhash_engine::color::linear_to_srgb;
/// assert_eq!(linear_to_srgb(0.0), 0);
/// assert_eq!(linear_to_srgb(1.0), 255);
/// assert_eq!(linear_to_srgb(-3.0), 0);
/// ```
#[inline]
pub fn linear_to_srgb(value: f64) -> u8 {
    let v = value.clamp(0.0, 1.0);
    if v <= 0.003_130_8 {
        (v * 12.92 * 255.0 + 0.5) as u8
    } else {
        ((1.055 * v.powf(1.0 / 2.4) - 0.055) * 255.0 + 0.5) as u8
    }
}

/// Compute `sign(value) * |value|^exp`.
///
/// # Examples
///
/// ```
/// use blurhash_engine::color::sign_pow;
/// assert!((sign_pow(4.0, 0.5) - 2.0).abs() < 1e-10);
/// assert!((sign_pow(-4.0, 0.5) - (-2.0)).abs() < 1e-10);
/// ```
#[inline]
pub fn sign_pow(value: f64, exp: f64) -> f64 {
    value.abs().powf(exp).copysign(value)
}
