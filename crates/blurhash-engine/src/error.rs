//! Error types for BlurHash encoding and decoding.

use thiserror::Error;

/// Errors that can occur during BlurHash encoding or decoding.
///
/// Every variant is a validation failure; none of them is retryable and none
/// represents a partially produced result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlurhashError {
    /// A component count is outside the valid range (1..=9).
    #[error("component count out of range: {component} = {value} (must be 1..=9)")]
    InvalidComponents {
        /// Which component axis ("x" or "y").
        component: &'static str,
        /// The invalid value.
        value: u32,
    },

    /// Image dimensions are invalid (zero, too large, or inconsistent).
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// The width value.
        width: u32,
        /// The height value.
        height: u32,
        /// Why the dimensions are invalid.
        reason: &'static str,
    },

    /// The BlurHash string cannot be parsed.
    #[error("malformed BlurHash: {0}")]
    MalformedHash(HashDefect),

    /// A pixel buffer holds fewer bytes than its dimensions and stride require.
    #[error("pixel buffer too small: need {expected} bytes, got {actual}")]
    BufferTooSmall {
        /// Minimum number of bytes required.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },

    /// A value does not fit in the requested number of base83 digits.
    #[error("value {value} does not fit in {digits} base83 digits")]
    ValueOutOfRange {
        /// The value that was being encoded.
        value: u64,
        /// The requested digit count.
        digits: usize,
    },
}

/// The reason a BlurHash string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashDefect {
    /// Shorter than the 6-character minimum.
    #[error("length {actual} is below the minimum of 6")]
    TooShort {
        /// Number of characters supplied.
        actual: usize,
    },

    /// The length does not agree with the component counts in the size flag.
    #[error("expected {expected} characters for the declared components, got {actual}")]
    LengthMismatch {
        /// Length implied by the size flag.
        expected: usize,
        /// Number of characters supplied.
        actual: usize,
    },

    /// The size flag declares more than nine vertical components.
    #[error("size flag {0} is out of range (max 80)")]
    SizeFlagOutOfRange(u64),

    /// A character outside the base83 alphabet (strict validation only).
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character index within the hash.
        position: usize,
    },
}

impl From<HashDefect> for BlurhashError {
    fn from(defect: HashDefect) -> Self {
        BlurhashError::MalformedHash(defect)
    }
}
