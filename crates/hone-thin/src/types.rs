//! Shared types for the thinning engine: sample levels, polarity,
//! and the error type.
//!
//! The engine operates on two-level rasters. Which numeric value plays
//! the "object" role is a property of the input, not of the algorithm,
//! so it is modeled as an explicit [`Polarity`] configuration value
//! carried through every sampling and matching step instead of being
//! compared against magic numbers at each site.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference raster
/// snapshots without depending on `image` directly.
pub use image::GrayImage;

/// One of the two roles a raster sample may play.
///
/// A `Level` is a role, not a number: the numeric sample value behind
/// each role depends on the configured [`Polarity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// A foreground pixel, part of the shape being thinned.
    Object,
    /// A background pixel.
    Background,
}

/// Which of the two raster levels represents the foreground object.
///
/// The polarity carries both numeric levels and selects the active
/// removal pattern set, so the rest of the engine never inspects raw
/// sample values directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// Dark shapes on a light background: OBJECT = 0, BACKGROUND = 255.
    DarkObject,
    /// Light shapes on a dark background: OBJECT = 255, BACKGROUND = 0.
    LightObject,
}

impl Polarity {
    /// The numeric sample value of the object level.
    #[must_use]
    pub const fn object_value(self) -> u8 {
        match self {
            Self::DarkObject => 0,
            Self::LightObject => 255,
        }
    }

    /// The numeric sample value of the background level.
    #[must_use]
    pub const fn background_value(self) -> u8 {
        match self {
            Self::DarkObject => 255,
            Self::LightObject => 0,
        }
    }

    /// The numeric sample value behind a [`Level`] role.
    #[must_use]
    pub const fn value_of(self, level: Level) -> u8 {
        match level {
            Level::Object => self.object_value(),
            Level::Background => self.background_value(),
        }
    }

    /// Classify a raw sample value into its level role.
    ///
    /// Returns `None` for any value that is neither the object nor the
    /// background level — the caller turns that into
    /// [`ThinError::NotBinary`] with the offending location attached.
    #[must_use]
    pub const fn classify(self, value: u8) -> Option<Level> {
        if value == self.object_value() {
            Some(Level::Object)
        } else if value == self.background_value() {
            Some(Level::Background)
        } else {
            None
        }
    }

    /// The removal pattern set active for this polarity.
    #[must_use]
    pub fn patterns(self) -> &'static crate::pattern::PatternSet {
        match self {
            Self::DarkObject => &crate::pattern::DARK_OBJECT_PATTERNS,
            Self::LightObject => &crate::pattern::LIGHT_OBJECT_PATTERNS,
        }
    }
}

/// Errors that can occur while skeletonizing a raster.
///
/// Both variants are terminal: the engine neither retries nor recovers,
/// and the one-shot entry points return no partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ThinError {
    /// The raster is too small to contain any interior pixel to scan.
    #[error("raster is {width}x{height}; thinning requires at least 3x3")]
    RasterTooSmall {
        /// Raster width in pixels.
        width: u32,
        /// Raster height in pixels.
        height: u32,
    },

    /// A sampled pixel held a value that is neither the object nor the
    /// background level of the configured polarity.
    ///
    /// The input was stale or mis-binarized; re-binarize and retry.
    #[error("pixel ({x}, {y}) has value {value}, which is neither level of the configured polarity")]
    NotBinary {
        /// Column of the offending pixel.
        x: u32,
        /// Row of the offending pixel.
        y: u32,
        /// The raw sample value found there.
        value: u8,
    },
}
