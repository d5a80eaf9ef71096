//! Quantization of DCT coefficients into the integers carried by a hash.
//!
//! The DC term is stored as a packed 24-bit sRGB color. AC terms are divided
//! by a shared maximum, passed through a square-root curve and quantized to
//! 19 levels per channel, giving a base-19 triple in `0..19^3`.

use crate::color::{linear_to_srgb, sign_pow, srgb_level_to_linear, srgb_to_linear};
use crate::grid::Rgb;

/// Number of quantization levels per AC channel.
const AC_LEVELS: u32 = 19;

/// Pack a linear RGB triple into `(r << 16) | (g << 8) | b` of sRGB bytes.
///
/// # Examples
///
/// ```
/// use blurhash_engine::quantize::encode_dc;
/// assert_eq!(encode_dc([1.0, 0.0, 1.0]), 0xFF00FF);
/// ```
pub fn encode_dc(rgb: Rgb) -> u32 {
    ((linear_to_srgb(rgb[0]) as u32) << 16)
        | ((linear_to_srgb(rgb[1]) as u32) << 8)
        | (linear_to_srgb(rgb[2]) as u32)
}

/// Unpack a DC value into linear RGB.
///
/// Green and blue are masked to eight bits. Red takes every bit above 16, so a
/// four-digit field larger than 24 bits yields a red level above 255.
pub fn decode_dc(packed: u32) -> Rgb {
    [
        srgb_level_to_linear(packed >> 16),
        srgb_to_linear(((packed >> 8) & 0xFF) as u8),
        srgb_to_linear((packed & 0xFF) as u8),
    ]
}

#[inline]
fn quantize_ac_channel(value: f64, maximum_value: f64) -> u32 {
    (sign_pow(value / maximum_value, 0.5) * 9.0 + 9.5)
        .floor()
        .clamp(0.0, 18.0) as u32
}

#[inline]
fn dequantize_ac_channel(quant: u32, maximum_value: f64) -> f64 {
    sign_pow((quant as f64 - 9.0) / 9.0, 2.0) * maximum_value
}

/// Quantize an AC coefficient against `maximum_value` into `0..19^3`.
pub fn encode_ac(rgb: Rgb, maximum_value: f64) -> u32 {
    let quant_r = quantize_ac_channel(rgb[0], maximum_value);
    let quant_g = quantize_ac_channel(rgb[1], maximum_value);
    let quant_b = quantize_ac_channel(rgb[2], maximum_value);
    quant_r * AC_LEVELS * AC_LEVELS + quant_g * AC_LEVELS + quant_b
}

/// Reconstruct an AC coefficient from its packed base-19 digits.
///
/// Digits are not clamped: a two-character field can carry a red digit of 19,
/// which is reconstructed by the same curve.
pub fn decode_ac(packed: u32, maximum_value: f64) -> Rgb {
    let quant_r = packed / (AC_LEVELS * AC_LEVELS);
    let quant_g = (packed / AC_LEVELS) % AC_LEVELS;
    let quant_b = packed % AC_LEVELS;
    [
        dequantize_ac_channel(quant_r, maximum_value),
        dequantize_ac_channel(quant_g, maximum_value),
        dequantize_ac_channel(quant_b, maximum_value),
    ]
}

/// The AC normalization scale, quantized to one base83 digit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaximumValue {
    quantized: u32,
    value: f64,
}

impl MaximumValue {
    /// Derive the maximum from the AC coefficients of a grid.
    ///
    /// With no AC terms the quantized index is 0 and the scale is 1.
    pub fn from_ac(ac: &[Rgb]) -> Self {
        if ac.is_empty() {
            return Self {
                quantized: 0,
                value: 1.0,
            };
        }
        let actual = ac
            .iter()
            .flat_map(|c| c.iter())
            .fold(0.0f64, |acc, v| acc.max(v.abs()));
        let quantized = (actual * 166.0 - 0.5).floor().clamp(0.0, 82.0) as u32;
        Self {
            quantized,
            value: (quantized as f64 + 1.0) / 166.0,
        }
    }

    /// Rebuild the scale from a serialized index, multiplied by `punch`.
    pub fn from_quantized(quantized: u32, punch: f64) -> Self {
        Self {
            quantized,
            value: (quantized as f64 + 1.0) / 166.0 * punch,
        }
    }

    /// The digit written to the hash.
    pub fn quantized(&self) -> u32 {
        self.quantized
    }

    /// The effective scale applied to AC terms.
    pub fn value(&self) -> f64 {
        self.value
    }
}
