//! Directional candidacy scan: one full-image sweep per cardinal
//! direction, deciding removals from a frozen source raster.
//!
//! Each sweep reads exclusively from the frozen source and writes into a
//! separate destination buffer, so the result of a sweep is independent
//! of pixel traversal order, and the four directional sweeps of one tick
//! are independent of the order they run in: the removability test does
//! not depend on the direction, so every direction that considers a
//! pixel a candidate writes the same value for it.

use serde::{Deserialize, Serialize};

use crate::neighborhood;
use crate::types::{GrayImage, Level, Polarity, ThinError};

/// A cardinal scan direction.
///
/// A pixel is a candidate in direction `d` when it is an object pixel
/// whose neighbor in direction `d` is background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// The neighbor above.
    North,
    /// The neighbor to the left.
    West,
    /// The neighbor to the right.
    East,
    /// The neighbor below.
    South,
}

impl Direction {
    /// The fixed order the four sweeps run in within one tick.
    pub const SCAN_ORDER: [Self; 4] = [Self::North, Self::West, Self::East, Self::South];

    /// Row-major index of this direction's neighbor in a sampled
    /// neighborhood.
    #[must_use]
    pub const fn neighbor_index(self) -> usize {
        match self {
            Self::North => 1,
            Self::West => 3,
            Self::East => 5,
            Self::South => 7,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::West => "west",
            Self::East => "east",
            Self::South => "south",
        }
    }
}

/// The destination value decided for one interior pixel, or `None` when
/// the pixel is not a candidate in this direction and the destination
/// must be left untouched.
///
/// # Errors
///
/// Returns [`ThinError::NotBinary`] if the sampled neighborhood violates
/// the two-level invariant.
pub(crate) fn decide(
    source: &GrayImage,
    polarity: Polarity,
    direction: Direction,
    x: u32,
    y: u32,
) -> Result<Option<Level>, ThinError> {
    let sampled = neighborhood::sample(source, polarity, x, y)?;
    if sampled.center() != Level::Object {
        return Ok(None);
    }
    if sampled.level(direction.neighbor_index()) != Level::Background {
        return Ok(None);
    }
    // A boundary candidate: removable neighborhoods become background,
    // all others are confirmed object.
    if polarity.patterns().matches(&sampled) {
        Ok(Some(Level::Background))
    } else {
        Ok(Some(Level::Object))
    }
}

/// Sweep every interior pixel of `source`, writing decisions for the
/// candidates of `direction` into `destination`.
///
/// Non-candidates leave the destination value untouched, so decisions
/// made by earlier directions in the same tick survive. Returns the
/// number of pixels this sweep newly turned to background (a pixel
/// already removed by an earlier direction is not counted again).
///
/// # Errors
///
/// Returns [`ThinError::NotBinary`] on the first sampled pixel that
/// violates the two-level invariant.
pub(crate) fn sweep(
    source: &GrayImage,
    destination: &mut GrayImage,
    polarity: Polarity,
    direction: Direction,
) -> Result<u64, ThinError> {
    let background = polarity.background_value();
    let mut removed = 0u64;

    for y in 1..source.height() - 1 {
        for x in 1..source.width() - 1 {
            match decide(source, polarity, direction, x, y)? {
                None => {}
                Some(Level::Background) => {
                    if destination.get_pixel(x, y).0[0] != background {
                        removed += 1;
                    }
                    destination.put_pixel(x, y, image::Luma([background]));
                }
                Some(Level::Object) => {
                    destination.put_pixel(x, y, image::Luma([polarity.object_value()]));
                }
            }
        }
    }
    Ok(removed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const POLARITY: Polarity = Polarity::DarkObject;

    /// 7x7 dark-object raster with a filled 3x3 block at (2..=4, 2..=4).
    fn block_raster() -> GrayImage {
        GrayImage::from_fn(7, 7, |x, y| {
            if (2..=4).contains(&x) && (2..=4).contains(&y) {
                image::Luma([0])
            } else {
                image::Luma([255])
            }
        })
    }

    #[test]
    fn neighbor_indices_are_cardinal() {
        assert_eq!(Direction::North.neighbor_index(), 1);
        assert_eq!(Direction::West.neighbor_index(), 3);
        assert_eq!(Direction::East.neighbor_index(), 5);
        assert_eq!(Direction::South.neighbor_index(), 7);
    }

    #[test]
    fn background_center_is_not_a_candidate() {
        let raster = block_raster();
        let decision = decide(&raster, POLARITY, Direction::North, 1, 1).unwrap();
        assert_eq!(decision, None);
    }

    #[test]
    fn object_center_without_background_neighbor_is_not_a_candidate() {
        let raster = block_raster();
        // Block center: object neighbors in all four cardinal directions.
        for direction in Direction::SCAN_ORDER {
            let decision = decide(&raster, POLARITY, direction, 3, 3).unwrap();
            assert_eq!(
                decision, None,
                "solid interior must not be a candidate toward {}",
                direction.label(),
            );
        }
    }

    #[test]
    fn top_edge_of_block_is_removable_northward() {
        let raster = block_raster();
        let decision = decide(&raster, POLARITY, Direction::North, 3, 2).unwrap();
        assert_eq!(decision, Some(Level::Background));
    }

    #[test]
    fn north_sweep_removes_exactly_the_top_row_of_a_block() {
        let raster = block_raster();
        let mut destination = raster.clone();
        let removed = sweep(&raster, &mut destination, POLARITY, Direction::North).unwrap();
        assert_eq!(removed, 3);
        for x in 2..=4 {
            assert_eq!(destination.get_pixel(x, 2).0[0], 255, "({x}, 2) removed");
            assert_eq!(destination.get_pixel(x, 3).0[0], 0, "({x}, 3) kept");
            assert_eq!(destination.get_pixel(x, 4).0[0], 0, "({x}, 4) kept");
        }
    }

    #[test]
    fn sweep_reads_only_the_frozen_source() {
        // Sweeping into a destination must not change what a second
        // identical sweep decides.
        let raster = block_raster();
        let mut first = raster.clone();
        sweep(&raster, &mut first, POLARITY, Direction::North).unwrap();
        let mut second = raster.clone();
        sweep(&raster, &mut second, POLARITY, Direction::North).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn sweep_agrees_with_per_pixel_decisions_in_any_traversal_order() {
        let raster = block_raster();
        let mut swept = raster.clone();
        for direction in Direction::SCAN_ORDER {
            sweep(&raster, &mut swept, POLARITY, direction).unwrap();
        }

        // Apply the same decisions pixel-by-pixel in a scrambled order:
        // reversed coordinates, directions permuted.
        let mut scrambled = raster.clone();
        let mut coords: Vec<(u32, u32)> = (1..raster.height() - 1)
            .flat_map(|y| (1..raster.width() - 1).map(move |x| (x, y)))
            .collect();
        coords.reverse();
        for direction in [
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::North,
        ] {
            for &(x, y) in &coords {
                if let Some(level) = decide(&raster, POLARITY, direction, x, y).unwrap() {
                    scrambled.put_pixel(x, y, image::Luma([POLARITY.value_of(level)]));
                }
            }
        }
        assert_eq!(swept, scrambled);
    }

    #[test]
    fn sweep_surfaces_validation_failures() {
        let mut raster = block_raster();
        raster.put_pixel(5, 5, image::Luma([100]));
        let mut destination = raster.clone();
        let err = sweep(&raster, &mut destination, POLARITY, Direction::North).unwrap_err();
        assert!(matches!(err, ThinError::NotBinary { x: 5, y: 5, value: 100 }));
    }

    #[test]
    fn removal_count_ignores_pixels_already_removed() {
        // The top-left corner of the block is removable both northward
        // and westward; the second sweep must not count it again.
        let raster = block_raster();
        let mut destination = raster.clone();
        let north = sweep(&raster, &mut destination, POLARITY, Direction::North).unwrap();
        let west = sweep(&raster, &mut destination, POLARITY, Direction::West).unwrap();
        assert_eq!(north, 3);
        // West candidates are the left column; (2, 2) was already
        // removed by the north sweep.
        assert_eq!(west, 2);
    }
}
