//! The BlurHash string layout.
//!
//! ```text
//! [size flag: 1][max AC: 1][DC: 4][AC 1: 2][AC 2: 2]...
//! ```
//!
//! Lengths and positions are counted in characters, never bytes, so a hash
//! containing non-ASCII text is rejected or skipped rather than split inside a
//! code point.

use crate::base83;
use crate::error::{BlurhashError, HashDefect};
use crate::grid::{CoefficientGrid, ComponentGrid};
use crate::quantize::{decode_ac, decode_dc, encode_ac, encode_dc, MaximumValue};

/// Shortest well-formed hash (a 1x1 grid).
pub const MIN_HASH_LEN: usize = 6;

/// How characters outside the base83 alphabet are treated when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Validation {
    /// Skip unknown characters inside a field; they contribute nothing.
    #[default]
    Permissive,
    /// Reject the hash at the first unknown character.
    Strict,
}

/// Quantize and serialize a coefficient grid.
///
/// # Errors
///
/// Only [`BlurhashError::ValueOutOfRange`], which quantization rules out in
/// practice.
pub fn serialize(coefficients: &CoefficientGrid) -> Result<String, BlurhashError> {
    let grid = coefficients.grid();
    let max = MaximumValue::from_ac(coefficients.ac());

    let mut hash = String::with_capacity(grid.hash_len());
    base83::encode_into(&mut hash, grid.size_flag() as u64, 1)?;
    base83::encode_into(&mut hash, max.quantized() as u64, 1)?;
    base83::encode_into(&mut hash, encode_dc(coefficients.dc()) as u64, 4)?;
    for &ac in coefficients.ac() {
        base83::encode_into(&mut hash, encode_ac(ac, max.value()) as u64, 2)?;
    }
    Ok(hash)
}

fn field(chars: &[char], start: usize, len: usize) -> u32 {
    base83::decode_chars(chars[start..start + len].iter().copied()) as u32
}

fn check_min_len(len: usize) -> Result<(), BlurhashError> {
    if len < MIN_HASH_LEN {
        return Err(HashDefect::TooShort { actual: len }.into());
    }
    Ok(())
}

/// Read the component grid declared by a hash's size flag.
///
/// Only the length floor and the size flag are checked.
pub fn components(hash: &str) -> Result<ComponentGrid, BlurhashError> {
    check_min_len(hash.chars().count())?;
    let flag = base83::decode_chars(hash.chars().take(1));
    ComponentGrid::from_size_flag(flag)
}

/// Parse a hash back into (dequantized) coefficients.
///
/// `punch` scales the AC magnitude; `1.0` reproduces the encoded contrast.
///
/// # Errors
///
/// [`BlurhashError::MalformedHash`] when the hash is shorter than six
/// characters, its length disagrees with its size flag, the size flag is out
/// of range, or (with [`Validation::Strict`]) it contains a character outside
/// the alphabet.
pub fn parse(
    hash: &str,
    punch: f64,
    validation: Validation,
) -> Result<CoefficientGrid, BlurhashError> {
    let chars: Vec<char> = hash.chars().collect();
    check_min_len(chars.len())?;

    if validation == Validation::Strict {
        if let Some((position, &character)) = chars
            .iter()
            .enumerate()
            .find(|&(_, &ch)| base83::digit_value(ch).is_none())
        {
            return Err(HashDefect::InvalidCharacter {
                character,
                position,
            }
            .into());
        }
    }

    let grid = ComponentGrid::from_size_flag(field(&chars, 0, 1) as u64)?;
    if chars.len() != grid.hash_len() {
        return Err(HashDefect::LengthMismatch {
            expected: grid.hash_len(),
            actual: chars.len(),
        }
        .into());
    }

    if validation == Validation::Permissive {
        let skipped = chars
            .iter()
            .filter(|&&ch| base83::digit_value(ch).is_none())
            .count();
        if skipped > 0 {
            log::warn!("skipping {skipped} character(s) outside the base83 alphabet in {hash:?}");
        }
    }

    let max = MaximumValue::from_quantized(field(&chars, 1, 1), punch);
    let mut values = Vec::with_capacity(grid.len());
    values.push(decode_dc(field(&chars, 2, 4)));
    for k in 1..grid.len() {
        values.push(decode_ac(field(&chars, 4 + 2 * k, 2), max.value()));
    }
    Ok(CoefficientGrid::new(grid, values))
}
