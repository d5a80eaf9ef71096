//! Base83 encoding and decoding used by the BlurHash wire format.
//!
//! Integers are written as fixed-length, most-significant-first digit strings
//! over an 83-character alphabet. Decoding comes in two flavours:
//!
//! * [`decode`] is permissive: characters outside the alphabet contribute
//!   nothing and are skipped. Hashes found in the wild rely on this.
//! * [`decode_strict`] rejects any unknown character.

use crate::error::{BlurhashError, HashDefect};

/// The 83-character alphabet used by BlurHash base83 encoding.
pub const ALPHABET: &[u8; 83] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz#$%*+,-.:;=?@[]^_{|}~";

/// Lookup table mapping ASCII byte values to their base83 digit value.
/// Invalid characters map to `255`.
const fn build_decode_lut() -> [u8; 128] {
    let mut lut = [255u8; 128];
    let mut i = 0;
    while i < 83 {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
}

/// Precomputed decode lookup table (computed at compile time).
static DECODE_LUT: [u8; 128] = build_decode_lut();

/// Return the digit value of `ch`, or `None` if it is not in the alphabet.
///
/// # Examples
///
/// ```
/// use blurhash_engine::base83::digit_value;
/// assert_eq!(digit_value('A'), Some(10));
/// assert_eq!(digit_value('!'), None);
/// ```
#[inline]
pub fn digit_value(ch: char) -> Option<u8> {
    if !ch.is_ascii() {
        return None;
    }
    match DECODE_LUT[ch as usize] {
        255 => None,
        digit => Some(digit),
    }
}

/// Decode a sequence of base83 characters, skipping any that are not in the alphabet.
///
/// Arithmetic wraps on overflow; the wire format never uses more than four
/// digits for a single value.
pub fn decode_chars<I>(chars: I) -> u64
where
    I: IntoIterator<Item = char>,
{
    chars
        .into_iter()
        .filter_map(digit_value)
        .fold(0u64, |value, digit| {
            value.wrapping_mul(83).wrapping_add(digit as u64)
        })
}

/// Decode a base83 string into an integer (permissive).
///
/// # Examples
///
/// ```
/// use blurhash_engine::base83::decode;
/// assert_eq!(decode("0"), 0);
/// assert_eq!(decode("~"), 82);
/// // Unknown characters are skipped.
/// assert_eq!(decode("1!0"), 83);
/// ```
pub fn decode(base83_str: &str) -> u64 {
    decode_chars(base83_str.chars())
}

/// Decode a base83 string into an integer, rejecting unknown characters.
///
/// # Errors
///
/// Returns [`BlurhashError::MalformedHash`] with [`HashDefect::InvalidCharacter`]
/// for the first character outside the alphabet, and
/// [`BlurhashError::ValueOutOfRange`] if the value overflows `u64`.
pub fn decode_strict(base83_str: &str) -> Result<u64, BlurhashError> {
    let mut value: u64 = 0;
    for (position, ch) in base83_str.chars().enumerate() {
        let digit = digit_value(ch).ok_or(HashDefect::InvalidCharacter {
            character: ch,
            position,
        })?;
        value = value
            .checked_mul(83)
            .and_then(|v| v.checked_add(digit as u64))
            .ok_or(BlurhashError::ValueOutOfRange {
                value: u64::MAX,
                digits: position + 1,
            })?;
    }
    Ok(value)
}

/// Encode an integer into a base83 string of exactly `length` characters.
///
/// # Errors
///
/// Returns [`BlurhashError::ValueOutOfRange`] if the value needs more than
/// `length` digits.
///
/// # Examples
///
/// ```
/// use blurhash_engine::base83::encode;
/// assert_eq!(encode(0, 1).unwrap(), "0");
/// assert_eq!(encode(82, 1).unwrap(), "~");
/// assert_eq!(encode(1, 4).unwrap(), "0001");
/// ```
pub fn encode(value: u64, length: usize) -> Result<String, BlurhashError> {
    let mut result = String::with_capacity(length);
    encode_into(&mut result, value, length)?;
    Ok(result)
}

/// Append the base83 digits of `value` to `out`.
///
/// Same contract as [`encode`], without allocating a fresh string.
pub fn encode_into(out: &mut String, value: u64, length: usize) -> Result<(), BlurhashError> {
    // 83^length is the first value that does NOT fit.
    let limit = u32::try_from(length)
        .ok()
        .and_then(|exp| 83u64.checked_pow(exp))
        .unwrap_or(u64::MAX);
    if value >= limit && limit != u64::MAX {
        return Err(BlurhashError::ValueOutOfRange {
            value,
            digits: length,
        });
    }

    let mut digits = vec![0u8; length];
    let mut remaining = value;
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(remaining % 83) as usize];
        remaining /= 83;
    }
    out.extend(digits.into_iter().map(char::from));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_chars() {
        assert_eq!(decode("0"), 0);
        assert_eq!(decode("1"), 1);
        assert_eq!(decode("~"), 82);
    }

    #[test]
    fn test_encode_single_chars() {
        assert_eq!(encode(0, 1).unwrap(), "0");
        assert_eq!(encode(1, 1).unwrap(), "1");
        assert_eq!(encode(82, 1).unwrap(), "~");
    }

    #[test]
    fn test_encode_with_padding() {
        assert_eq!(encode(0, 4).unwrap(), "0000");
        assert_eq!(encode(1, 4).unwrap(), "0001");
        assert_eq!(encode(83, 2).unwrap(), "10");
    }

    #[test]
    fn test_decode_multi_char() {
        assert_eq!(decode("10"), 83);
        assert_eq!(decode("00"), 0);
        assert_eq!(decode("~~"), 83 * 83 - 1);
    }

    #[test]
    fn test_decode_skips_unknown_chars() {
        assert_eq!(decode(" "), 0);
        assert_eq!(decode("!1 0"), 83);
        assert_eq!(decode("é~"), 82);
    }

    #[test]
    fn test_decode_strict_rejects_unknown_chars() {
        assert_eq!(decode_strict("1~").unwrap(), 83 + 82);
        assert_eq!(
            decode_strict("1!0"),
            Err(BlurhashError::MalformedHash(HashDefect::InvalidCharacter {
                character: '!',
                position: 1,
            }))
        );
    }

    #[test]
    fn test_decode_strict_overflow() {
        let long = "~".repeat(12);
        assert!(matches!(
            decode_strict(&long),
            Err(BlurhashError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_encode_value_too_large() {
        assert_eq!(
            encode(83, 1),
            Err(BlurhashError::ValueOutOfRange {
                value: 83,
                digits: 1
            })
        );
        assert!(encode(83 * 83, 2).is_err());
        assert!(encode(83 * 83 - 1, 2).is_ok());
    }

    #[test]
    fn test_encode_into_appends() {
        let mut s = String::from("x");
        encode_into(&mut s, 21, 1).unwrap();
        encode_into(&mut s, 0, 2).unwrap();
        assert_eq!(s, "xL00");
    }

    #[test]
    fn test_alphabet_completeness() {
        for (i, &ch) in ALPHABET.iter().enumerate() {
            assert_eq!(digit_value(ch as char), Some(i as u8));
            let s = String::from(ch as char);
            assert_eq!(decode(&s), i as u64);
        }
    }
}
