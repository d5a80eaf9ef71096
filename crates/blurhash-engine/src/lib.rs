//! # blurhash-engine
//!
//! BlurHash encoding and decoding in pure Rust, with interchangeable
//! execution strategies for the basis transform.
//!
//! [BlurHash](https://blurha.sh/) is a compact representation of a placeholder
//! for an image. The codec projects an image onto a small grid of cosine basis
//! functions, quantizes the coefficients and writes them as a short base83
//! string that decodes back into a blurred approximation at any size.
//!
//! ## Quick Start
//!
//! ```
//! use blurhash_engine::{encode, decode};
//!
//! // Encode: image pixels -> BlurHash string
//! let pixels = vec![128u8; 4 * 4 * 3]; // 4x4 gray image
//! let hash = encode(&pixels, 4, 4, 4, 3).unwrap();
//!
//! // Decode: BlurHash string -> image pixels
//! let decoded = decode(&hash, 32, 32, 1.0).unwrap();
//! assert_eq!(decoded.len(), 32 * 32 * 3);
//! ```
//!
//! ## Strategies
//!
//! [`ComputeStrategy::Scalar`] is the bit-reproducible reference.
//! [`ComputeStrategy::Vectorized`] runs a separable f32 transform on SIMD
//! kernels (feature `simd`), and [`ComputeStrategy::DataParallel`] spreads
//! tiles over the rayon pool (feature `parallel`). All three agree to within
//! 1e-3 per coefficient channel.
//!
//! ```
//! use blurhash_engine::{ComputeStrategy, Decoder, Encoder, PixelBuffer, PixelLayout};
//!
//! let pixels: Vec<u8> = (0..64u32 * 48).flat_map(|i| [(i % 64 * 4) as u8, 90, 200]).collect();
//! let image = PixelBuffer::new(&pixels, 64, 48, PixelLayout::Rgb).unwrap();
//!
//! let hash = Encoder::new(5, 4)
//!     .unwrap()
//!     .with_strategy(ComputeStrategy::DataParallel)
//!     .encode(&image)
//!     .unwrap();
//! let preview = Decoder::new()
//!     .with_layout(PixelLayout::Rgba)
//!     .decode(&hash, 20, 15)
//!     .unwrap();
//! assert_eq!(preview.as_bytes().len(), 20 * 15 * 4);
//! ```

pub mod base83;
pub mod color;
pub mod compare;
pub mod engine;
pub mod error;
pub mod grid;
pub mod hash;
pub mod pixels;
pub mod quantize;
pub mod simd;

mod decode_impl;
mod encode_impl;

// Re-export primary types and functions at crate root.
pub use color::{linear_to_srgb, sign_pow, srgb_to_linear};
pub use compare::{compare, Comparison, ComparisonMethod};
pub use decode_impl::{components, decode, Decoder};
pub use encode_impl::{encode, Encoder};
pub use engine::ComputeStrategy;
pub use error::{BlurhashError, HashDefect};
pub use grid::{CoefficientGrid, ComponentGrid, Rgb};
pub use hash::Validation;
pub use pixels::{ImageSink, ImageSource, PixelBuffer, PixelLayout, MAX_DIMENSION};
