//! Border policy: force the outer 1-pixel ring to a constant level.
//!
//! The directional scans never visit the outer ring as a center, so its
//! content would otherwise be whatever the input happened to carry.
//! After every tick the ring is overwritten with a single caller-chosen
//! level so snapshots never retain stale frame content.

use crate::types::{GrayImage, Level, Polarity};

/// Overwrite the outer 1-pixel ring of `raster` with `level`.
///
/// Rows `0` and `height - 1` and columns `0` and `width - 1` are set to
/// the numeric value of `level` under `polarity`; the interior is left
/// untouched.
pub fn apply_border(raster: &mut GrayImage, polarity: Polarity, level: Level) {
    let value = image::Luma([polarity.value_of(level)]);
    let (width, height) = raster.dimensions();
    for x in 0..width {
        raster.put_pixel(x, 0, value);
        raster.put_pixel(x, height - 1, value);
    }
    for y in 0..height {
        raster.put_pixel(0, y, value);
        raster.put_pixel(width - 1, y, value);
    }
}
