//! Component counts and coefficient grids.

use crate::error::{BlurhashError, HashDefect};

/// A linear-light RGB triple.
pub type Rgb = [f64; 3];

/// Number of cosine-basis cells sampled along each axis, each in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentGrid {
    x: u32,
    y: u32,
}

impl ComponentGrid {
    /// Largest component count on either axis.
    pub const MAX: u32 = 9;

    /// Validate a pair of component counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use blurhash_engine::ComponentGrid;
    /// assert!(ComponentGrid::new(9, 9).is_ok());
    /// assert!(ComponentGrid::new(10, 1).is_err());
    /// ```
    pub fn new(x: u32, y: u32) -> Result<Self, BlurhashError> {
        if !(1..=Self::MAX).contains(&x) {
            return Err(BlurhashError::InvalidComponents {
                component: "x",
                value: x,
            });
        }
        if !(1..=Self::MAX).contains(&y) {
            return Err(BlurhashError::InvalidComponents {
                component: "y",
                value: y,
            });
        }
        Ok(Self { x, y })
    }

    /// Recover the grid from a decoded size flag.
    pub fn from_size_flag(flag: u64) -> Result<Self, BlurhashError> {
        let max_flag = (Self::MAX * Self::MAX - 1) as u64;
        if flag > max_flag {
            return Err(HashDefect::SizeFlagOutOfRange(flag).into());
        }
        Self::new((flag % 9) as u32 + 1, (flag / 9) as u32 + 1)
    }

    /// Horizontal component count.
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Vertical component count.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Total number of cells (`x * y`).
    #[inline]
    pub fn len(&self) -> usize {
        (self.x * self.y) as usize
    }

    /// Always `false`; a grid holds at least the DC cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The single-digit size flag `(x - 1) + (y - 1) * 9`.
    #[inline]
    pub fn size_flag(&self) -> u32 {
        (self.x - 1) + (self.y - 1) * 9
    }

    /// Length of a hash carrying this grid: `4 + 2 * x * y`.
    #[inline]
    pub fn hash_len(&self) -> usize {
        4 + 2 * self.len()
    }
}

/// DCT coefficients in linear RGB, indexed `i + j * x`.
///
/// Index 0 is the DC term (average color); all others are AC terms.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientGrid {
    grid: ComponentGrid,
    values: Vec<Rgb>,
}

impl CoefficientGrid {
    /// Build a grid from exactly `grid.len()` coefficients.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != grid.len()`.
    pub fn new(grid: ComponentGrid, values: Vec<Rgb>) -> Self {
        assert_eq!(
            values.len(),
            grid.len(),
            "coefficient count must match the component grid"
        );
        Self { grid, values }
    }

    /// The component counts.
    #[inline]
    pub fn grid(&self) -> ComponentGrid {
        self.grid
    }

    /// The DC (average color) term.
    #[inline]
    pub fn dc(&self) -> Rgb {
        self.values[0]
    }

    /// The AC terms in index order.
    #[inline]
    pub fn ac(&self) -> &[Rgb] {
        &self.values[1..]
    }

    /// Coefficient at horizontal frequency `i`, vertical frequency `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Rgb {
        self.values[i + j * self.grid.x() as usize]
    }

    /// All coefficients in index order.
    #[inline]
    pub fn as_slice(&self) -> &[Rgb] {
        &self.values
    }

    /// Largest per-channel absolute difference against `other`.
    ///
    /// Returns `None` if the grids have different component counts.
    pub fn max_difference(&self, other: &CoefficientGrid) -> Option<f64> {
        if self.grid != other.grid {
            return None;
        }
        let diff = self
            .values
            .iter()
            .zip(&other.values)
            .flat_map(|(a, b)| (0..3).map(move |c| (a[c] - b[c]).abs()))
            .fold(0.0f64, f64::max);
        Some(diff)
    }
}
