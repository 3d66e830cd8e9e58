//! hone-thin: iterative template-driven skeletonization (thinning) for
//! binary raster images (sans-IO).
//!
//! Peels boundary pixels off a two-level raster, one layer per tick,
//! until the shape stops shrinking:
//! four directional candidacy sweeps -> hit-or-miss removal templates ->
//! border policy -> snapshot, repeated to convergence.
//!
//! The result is a [`StepHistory`]: one snapshot per tick, which a
//! consumer can scrub through to preview intermediate skeletons or take
//! the last step as the converged result.
//!
//! This crate has **no I/O dependencies** — it operates on in-memory
//! [`GrayImage`] rasters and returns structured data. Decoding,
//! binarization, and any interactive preview live in consumers.

pub mod border;
pub mod diagnostics;
pub mod history;
pub mod neighborhood;
pub mod pattern;
pub mod scan;
pub mod session;
pub mod types;

pub use diagnostics::{Clock, ThinDiagnostics, skeletonize_with_diagnostics};
pub use history::StepHistory;
pub use scan::Direction;
pub use session::{Session, TickCounts};
pub use types::{GrayImage, Level, Polarity, ThinError};

/// Skeletonize a two-level raster to convergence.
///
/// Runs ticks — four directional candidacy sweeps over a frozen copy of
/// the working raster, border application, snapshot — until a tick
/// removes nothing. Always runs at least one full tick, so the returned
/// history has at least one step and its first step already reflects
/// `border` even when the input is a fixed point.
///
/// The input must already be binarized: every sample must hold one of
/// the two numeric levels implied by `polarity`. The engine re-validates
/// this on every sampled pixel rather than trusting the caller.
///
/// # Errors
///
/// Returns [`ThinError::RasterTooSmall`] if `input` is smaller than
/// 3×3, and [`ThinError::NotBinary`] on the first sampled pixel holding
/// any other value than the two configured levels. The call is
/// all-or-nothing: no partial history is returned on failure (drive
/// [`Session`] tick-by-tick to observe progress before a failure).
pub fn skeletonize(
    input: &GrayImage,
    polarity: Polarity,
    border: Level,
) -> Result<StepHistory, ThinError> {
    Session::new(input.clone(), polarity, border)?.into_history()
}
