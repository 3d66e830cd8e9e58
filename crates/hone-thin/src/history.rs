//! Step history: the ordered sequence of per-tick skeleton snapshots.
//!
//! The engine appends one snapshot per completed tick and returns the
//! finished history as an immutable value. A consumer scrubbing between
//! thinning steps (a preview slider, an undo strip) only ever reads it;
//! selecting the last step is equivalent to "use the fully converged
//! skeleton".
//!
//! Uses custom `Serialize`/`Deserialize` because `image::ImageBuffer`
//! does not implement serde traits. Snapshots are serialized as
//! `(width, height, raw_pixels)` tuples.

use serde::{Deserialize, Serialize};

use crate::types::GrayImage;

/// An ordered, append-only sequence of skeleton snapshots, one per
/// completed tick, never empty.
///
/// Steps are 1-indexed from the caller's point of view: step `1` is the
/// raster after the first tick, step [`len`](Self::len) is the converged
/// skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepHistory {
    steps: Vec<GrayImage>,
}

impl StepHistory {
    /// Build a history from recorded snapshots.
    ///
    /// The engine guarantees at least one snapshot: the convergence loop
    /// always performs at least one full tick.
    pub(crate) fn new(steps: Vec<GrayImage>) -> Self {
        debug_assert!(!steps.is_empty(), "a step history holds at least one step");
        Self { steps }
    }

    /// Number of recorded steps. Always at least 1.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the history holds no steps. Always `false` for histories
    /// produced by the engine; provided for API completeness.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All snapshots in tick order.
    #[must_use]
    pub fn steps(&self) -> &[GrayImage] {
        &self.steps
    }

    /// The snapshot for a 1-indexed step, clamped to the valid range.
    ///
    /// Out-of-range requests are clamped rather than rejected: `0`
    /// selects the first step and anything beyond
    /// [`len`](Self::len) selects the last.
    #[must_use]
    pub fn step(&self, index: usize) -> &GrayImage {
        let clamped = index.max(1).min(self.steps.len());
        &self.steps[clamped - 1]
    }

    /// The converged skeleton — the last recorded step.
    #[must_use]
    pub fn final_step(&self) -> &GrayImage {
        self.step(self.steps.len())
    }
}

/// Serde-compatible proxy for [`StepHistory`].
#[derive(Serialize, Deserialize)]
struct StepHistoryProxy {
    steps: Vec<(u32, u32, Vec<u8>)>,
}

impl Serialize for StepHistory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let proxy = StepHistoryProxy {
            steps: self
                .steps
                .iter()
                .map(|s| (s.width(), s.height(), s.as_raw().clone()))
                .collect(),
        };
        proxy.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StepHistory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let proxy = StepHistoryProxy::deserialize(deserializer)?;
        if proxy.steps.is_empty() {
            return Err(serde::de::Error::custom(
                "a step history holds at least one step",
            ));
        }
        let steps = proxy
            .steps
            .into_iter()
            .map(|(width, height, raw)| {
                GrayImage::from_raw(width, height, raw)
                    .ok_or_else(|| serde::de::Error::custom("invalid snapshot dimensions"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot(fill: u8) -> GrayImage {
        GrayImage::from_pixel(4, 3, image::Luma([fill]))
    }

    fn three_step_history() -> StepHistory {
        StepHistory::new(vec![snapshot(10), snapshot(20), snapshot(30)])
    }

    #[test]
    fn len_counts_steps() {
        let history = three_step_history();
        assert_eq!(history.len(), 3);
        assert!(!history.is_empty());
    }

    #[test]
    fn step_is_one_indexed() {
        let history = three_step_history();
        assert_eq!(history.step(1).get_pixel(0, 0).0[0], 10);
        assert_eq!(history.step(2).get_pixel(0, 0).0[0], 20);
        assert_eq!(history.step(3).get_pixel(0, 0).0[0], 30);
    }

    #[test]
    fn step_zero_clamps_to_first() {
        let history = three_step_history();
        assert_eq!(history.step(0), history.step(1));
    }

    #[test]
    fn step_beyond_len_clamps_to_last() {
        let history = three_step_history();
        assert_eq!(history.step(4), history.step(3));
        assert_eq!(history.step(usize::MAX), history.step(3));
    }

    #[test]
    fn final_step_is_the_last_snapshot() {
        let history = three_step_history();
        assert_eq!(history.final_step(), history.step(3));
    }

    #[test]
    fn serde_round_trip_preserves_snapshots() {
        let history = three_step_history();
        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StepHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(history, deserialized);
    }

    #[test]
    fn deserializing_an_empty_history_fails() {
        let err = serde_json::from_str::<StepHistory>(r#"{"steps":[]}"#).unwrap_err();
        assert!(err.to_string().contains("at least one step"));
    }

    #[test]
    fn deserializing_mismatched_dimensions_fails() {
        // 4x3 snapshot needs 12 bytes; provide 5.
        let json = r#"{"steps":[[4,3,[0,0,0,0,0]]]}"#;
        let err = serde_json::from_str::<StepHistory>(json).unwrap_err();
        assert!(err.to_string().contains("invalid snapshot dimensions"));
    }
}
