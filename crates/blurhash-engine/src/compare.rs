//! Per-pixel comparison of two decoded images.
//!
//! BlurHash is lossy and the execution strategies are only required to agree
//! within a tolerance, so decoded images are compared by counting pixels that
//! differ noticeably rather than by byte equality.

use crate::error::BlurhashError;
use crate::pixels::PixelBuffer;

/// How two images are compared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComparisonMethod {
    /// A pixel differs when any RGB channel differs by more than
    /// `per_pixel_tolerance * 255`, rounded to the nearest level. The images
    /// match when at most `overall_tolerance` of all pixels differ.
    PerPixel {
        /// Largest allowed channel difference, in `[0, 1]`.
        per_pixel_tolerance: f64,
        /// Largest allowed fraction of differing pixels, in `[0, 1]`.
        overall_tolerance: f64,
    },
    /// Every RGB channel of every pixel must be identical.
    Strict,
}

impl Default for ComparisonMethod {
    /// 5% per channel, 2% of pixels.
    fn default() -> Self {
        ComparisonMethod::PerPixel {
            per_pixel_tolerance: 0.05,
            overall_tolerance: 0.02,
        }
    }
}

/// Outcome of [`compare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    /// Whether the images are considered equivalent.
    pub matches: bool,
    /// Fraction of pixels that differ, in `[0, 1]`.
    pub differing_ratio: f64,
}

/// Compare the RGB channels of two images of equal size.
///
/// Layout and row stride may differ between the two buffers; alpha is ignored.
///
/// # Errors
///
/// [`BlurhashError::InvalidDimensions`] if the images differ in size.
pub fn compare(
    a: &PixelBuffer<'_>,
    b: &PixelBuffer<'_>,
    method: ComparisonMethod,
) -> Result<Comparison, BlurhashError> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(BlurhashError::InvalidDimensions {
            width: b.width(),
            height: b.height(),
            reason: "compared images differ in size",
        });
    }

    let threshold = match method {
        ComparisonMethod::PerPixel {
            per_pixel_tolerance,
            ..
        } => (per_pixel_tolerance * 255.0).round(),
        ComparisonMethod::Strict => 0.0,
    };

    let mut differing = 0usize;
    for y in 0..a.height() {
        for x in 0..a.width() {
            let (pa, pb) = (a.pixel(x, y), b.pixel(x, y));
            let differs = pa
                .iter()
                .zip(&pb)
                .any(|(&ca, &cb)| (ca as f64 - cb as f64).abs() > threshold);
            if differs {
                differing += 1;
            }
        }
    }

    let total = a.width() as usize * a.height() as usize;
    let differing_ratio = differing as f64 / total as f64;
    let matches = match method {
        ComparisonMethod::PerPixel {
            overall_tolerance, ..
        } => differing_ratio <= overall_tolerance,
        ComparisonMethod::Strict => differing == 0,
    };
    log::trace!(
        "compared {}x{} images: {differing} of {total} pixels differ",
        a.width(),
        a.height()
    );
    Ok(Comparison {
        matches,
        differing_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::PixelLayout;

    fn solid(value: u8, width: u32, height: u32) -> PixelBuffer<'static> {
        PixelBuffer::from_vec(
            vec![value; (width * height * 3) as usize],
            width,
            height,
            PixelLayout::Rgb,
        )
        .unwrap()
    }

    #[test]
    fn test_identical_images_match_strictly() {
        let a = solid(40, 4, 4);
        let result = compare(&a, &a.clone(), ComparisonMethod::Strict).unwrap();
        assert!(result.matches);
        assert_eq!(result.differing_ratio, 0.0);
    }

    #[test]
    fn test_small_channel_drift_is_tolerated() {
        // 10/255 is within 5%.
        let result = compare(&solid(100, 4, 4), &solid(110, 4, 4), ComparisonMethod::default())
            .unwrap();
        assert!(result.matches);
        assert_eq!(result.differing_ratio, 0.0);

        let strict = compare(&solid(100, 4, 4), &solid(110, 4, 4), ComparisonMethod::Strict)
            .unwrap();
        assert!(!strict.matches);
        assert_eq!(strict.differing_ratio, 1.0);
    }

    #[test]
    fn test_threshold_rounds_to_nearest_level() {
        // 0.05 * 255 = 12.75 rounds to 13: a step of 13 passes, 14 does not.
        let method = ComparisonMethod::PerPixel {
            per_pixel_tolerance: 0.05,
            overall_tolerance: 0.0,
        };
        assert!(compare(&solid(100, 2, 2), &solid(113, 2, 2), method).unwrap().matches);
        let result = compare(&solid(100, 2, 2), &solid(114, 2, 2), method).unwrap();
        assert!(!result.matches);
        assert_eq!(result.differing_ratio, 1.0);
    }

    #[test]
    fn test_overall_tolerance() {
        // 1 of 10 pixels is far off.
        let a = solid(0, 10, 1);
        let mut data = vec![0u8; 30];
        data[0] = 255;
        let b = PixelBuffer::new(&data, 10, 1, PixelLayout::Rgb).unwrap();

        let loose = ComparisonMethod::PerPixel {
            per_pixel_tolerance: 0.05,
            overall_tolerance: 0.1,
        };
        let tight = ComparisonMethod::PerPixel {
            per_pixel_tolerance: 0.05,
            overall_tolerance: 0.02,
        };
        let result = compare(&a, &b, loose).unwrap();
        assert!(result.matches);
        assert!((result.differing_ratio - 0.1).abs() < 1e-12);
        assert!(!compare(&a, &b, tight).unwrap().matches);
    }

    #[test]
    fn test_alpha_and_layout_ignored() {
        let rgb = [10u8, 20, 30];
        let bgra = [30u8, 20, 10, 0];
        let a = PixelBuffer::new(&rgb, 1, 1, PixelLayout::Rgb).unwrap();
        let b = PixelBuffer::new(&bgra, 1, 1, PixelLayout::Bgra).unwrap();
        assert!(compare(&a, &b, ComparisonMethod::Strict).unwrap().matches);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        assert!(matches!(
            compare(&solid(0, 2, 2), &solid(0, 2, 3), ComparisonMethod::Strict),
            Err(BlurhashError::InvalidDimensions { .. })
        ));
    }
}
