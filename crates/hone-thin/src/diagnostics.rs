//! Skeletonization diagnostics: per-tick timing and removal counts.
//!
//! These diagnostics are permanent instrumentation intended for
//! parameter experimentation and performance tuning. Timing is measured
//! through a caller-injected [`Clock`] so this crate stays free of
//! platform time dependencies; a native consumer supplies an
//! `std::time::Instant`-backed implementation.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::history::StepHistory;
use crate::session::{Session, TickCounts};
use crate::types::{GrayImage, Level, Polarity, ThinError};

/// A monotonic time source injected by the caller.
pub trait Clock {
    /// An opaque point in time.
    type Instant;

    /// The current instant.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics for a single tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickDiagnostics {
    /// Wall-clock duration of the tick (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Pixels removed, broken down by scan direction.
    pub removed: TickCounts,
    /// Object pixels remaining after the tick.
    pub object_pixels: u64,
}

/// High-level summary of a whole skeletonization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThinSummary {
    /// Raster width in pixels.
    pub image_width: u32,
    /// Raster height in pixels.
    pub image_height: u32,
    /// Total pixel count.
    pub pixel_count: u64,
    /// Ticks until convergence (equals the history length).
    pub tick_count: usize,
    /// Object pixels in the input.
    pub object_pixels_before: u64,
    /// Object pixels in the converged skeleton.
    pub object_pixels_after: u64,
}

/// Diagnostics collected from a single skeletonization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThinDiagnostics {
    /// One entry per completed tick, in order.
    pub ticks: Vec<TickDiagnostics>,
    /// Total wall-clock duration of the run (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts across the run.
    pub summary: ThinSummary,
}

impl ThinDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Skeletonization Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Image: {}x{} ({} pixels)",
            self.summary.image_width, self.summary.image_height, self.summary.pixel_count,
        ));
        lines.push(format!(
            "Object pixels: {} -> {} over {} tick(s)",
            self.summary.object_pixels_before,
            self.summary.object_pixels_after,
            self.summary.tick_count,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<6} {:>10} {:>8} {:>9} {:>22} {:>11}",
            "Tick", "Duration", "% Total", "Removed", "N / W / E / S", "Object px"
        ));
        lines.push("-".repeat(72));

        let total_ms = duration_ms(self.total_duration);
        for (index, tick) in self.ticks.iter().enumerate() {
            let ms = duration_ms(tick.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let directions = format!(
                "{} / {} / {} / {}",
                tick.removed.north, tick.removed.west, tick.removed.east, tick.removed.south,
            );
            lines.push(format!(
                "{:<6} {ms:>8.3}ms {pct:>7.1}% {:>9} {directions:>22} {:>11}",
                index + 1,
                tick.removed.total(),
                tick.object_pixels,
            ));
        }

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Count the pixels holding the object level of `polarity`.
///
/// Counts raw values without validating the two-level invariant; the
/// sweeps own validation.
#[must_use]
pub fn count_object_pixels(image: &GrayImage, polarity: Polarity) -> u64 {
    let object = polarity.object_value();
    image.pixels().map(|p| u64::from(p.0[0] == object)).sum()
}

/// Skeletonize `input`, collecting per-tick diagnostics alongside the
/// step history.
///
/// Behaves exactly like [`skeletonize`](crate::skeletonize) with respect
/// to the result; the additional diagnostics describe where the run
/// spent its time and how quickly the shape shrank.
///
/// # Errors
///
/// Returns [`ThinError::RasterTooSmall`] for inputs smaller than 3×3
/// and [`ThinError::NotBinary`] for any sampled pixel violating the
/// two-level invariant. No partial diagnostics are returned on failure.
pub fn skeletonize_with_diagnostics<C: Clock>(
    input: &GrayImage,
    polarity: Polarity,
    border: Level,
    clock: &C,
) -> Result<(StepHistory, ThinDiagnostics), ThinError> {
    let run_start = clock.now();
    let (image_width, image_height) = input.dimensions();
    let object_pixels_before = count_object_pixels(input, polarity);

    let mut session = Session::new(input.clone(), polarity, border)?;
    let mut ticks = Vec::new();
    while !session.converged() {
        let tick_start = clock.now();
        let removed = session.tick()?;
        let duration = clock.elapsed(&tick_start);
        let object_pixels = session
            .steps()
            .last()
            .map_or(0, |snapshot| count_object_pixels(snapshot, polarity));
        ticks.push(TickDiagnostics {
            duration,
            removed,
            object_pixels,
        });
    }
    let total_duration = clock.elapsed(&run_start);

    let history = session.into_history()?;
    let summary = ThinSummary {
        image_width,
        image_height,
        pixel_count: u64::from(image_width) * u64::from(image_height),
        tick_count: history.len(),
        object_pixels_before,
        object_pixels_after: count_object_pixels(history.final_step(), polarity),
    };
    Ok((
        history,
        ThinDiagnostics {
            ticks,
            total_duration,
            summary,
        },
    ))
}
