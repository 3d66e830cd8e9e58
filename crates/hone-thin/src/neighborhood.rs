//! Neighborhood sampling: read the 3×3 surroundings of an interior
//! pixel as level roles, validating the two-level invariant.
//!
//! Sampling is the single point where raw `u8` values enter the engine.
//! Every sample is classified through the configured polarity, so any
//! pixel holding a value other than the two configured levels is caught
//! here and reported as [`ThinError::NotBinary`] — never silently
//! tolerated downstream.

use crate::types::{GrayImage, Level, Polarity, ThinError};

/// Row-major index of the center pixel in a sampled neighborhood.
pub const CENTER: usize = 4;

/// The 9 sampled levels of a pixel and its 8 neighbors, row-major,
/// center at index [`CENTER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    levels: [Level; 9],
}

impl Neighborhood {
    /// Build a neighborhood from already-classified levels.
    #[must_use]
    pub const fn from_levels(levels: [Level; 9]) -> Self {
        Self { levels }
    }

    /// The sampled levels in row-major order.
    #[must_use]
    pub const fn levels(&self) -> &[Level; 9] {
        &self.levels
    }

    /// The level of the center pixel.
    #[must_use]
    pub const fn center(&self) -> Level {
        self.levels[CENTER]
    }

    /// The level at a row-major position.
    #[must_use]
    pub const fn level(&self, index: usize) -> Level {
        self.levels[index]
    }
}

/// Sample the neighborhood of the interior pixel at `(x, y)`.
///
/// The caller must pass an interior location: `1 <= x <= width - 2` and
/// `1 <= y <= height - 2`. The outer ring is never sampled as a center,
/// though ring pixels are read (and validated) as neighbors of the
/// interior pixels adjacent to them.
///
/// Pure: the raster is never mutated.
///
/// # Errors
///
/// Returns [`ThinError::NotBinary`] naming the offending pixel if any
/// of the 9 sampled values is neither the object nor the background
/// level of `polarity`.
pub fn sample(
    raster: &GrayImage,
    polarity: Polarity,
    x: u32,
    y: u32,
) -> Result<Neighborhood, ThinError> {
    debug_assert!(
        x >= 1 && y >= 1 && x + 1 < raster.width() && y + 1 < raster.height(),
        "neighborhood center ({x}, {y}) must be an interior pixel",
    );

    let mut levels = [Level::Background; 9];
    let mut index = 0;
    for dy in 0..3 {
        for dx in 0..3 {
            let px = x + dx - 1;
            let py = y + dy - 1;
            let value = raster.get_pixel(px, py).0[0];
            levels[index] = polarity.classify(value).ok_or(ThinError::NotBinary {
                x: px,
                y: py,
                value,
            })?;
            index += 1;
        }
    }
    Ok(Neighborhood::from_levels(levels))
}
