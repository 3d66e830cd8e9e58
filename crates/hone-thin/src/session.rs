//! Skeletonization session: the convergence loop over directional
//! sweeps, driven one tick at a time.
//!
//! A session owns the current working raster and accumulates one
//! snapshot per tick. Within a tick the working raster is frozen: the
//! four directional sweeps all read from it and write into a separate
//! destination buffer, which replaces the working raster when the tick
//! completes. The session converges on the first tick that removes
//! nothing.
//!
//! Callers that just want the result use [`skeletonize`](crate::skeletonize);
//! a caller that wants to observe progress (or keep the partial history
//! when a later tick fails validation) drives [`tick`](Session::tick)
//! itself and inspects [`steps`](Session::steps) between ticks.

use serde::{Deserialize, Serialize};

use crate::border;
use crate::history::StepHistory;
use crate::scan::{self, Direction};
use crate::types::{GrayImage, Level, Polarity, ThinError};

/// Pixels removed by one tick, broken down by scan direction.
///
/// A pixel removable in more than one direction is attributed to the
/// first direction that removed it in the fixed
/// [`SCAN_ORDER`](Direction::SCAN_ORDER); the [`total`](Self::total) is
/// independent of that attribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCounts {
    /// Pixels first removed by the north sweep.
    pub north: u64,
    /// Pixels first removed by the west sweep.
    pub west: u64,
    /// Pixels first removed by the east sweep.
    pub east: u64,
    /// Pixels first removed by the south sweep.
    pub south: u64,
}

impl TickCounts {
    /// Total pixels removed by the tick.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.north + self.west + self.east + self.south
    }
}

/// A single skeletonization run: configuration, working raster, and the
/// snapshots recorded so far.
///
/// Created per invocation and discarded when the caller is done; no
/// state crosses invocations.
#[derive(Debug, Clone)]
pub struct Session {
    current: GrayImage,
    polarity: Polarity,
    border: Level,
    steps: Vec<GrayImage>,
    converged: bool,
}

impl Session {
    /// Start a session over `input`.
    ///
    /// The input is validated lazily: sample values are checked as the
    /// sweeps visit them, so a mis-binarized pixel surfaces from the
    /// tick that first reads it.
    ///
    /// # Errors
    ///
    /// Returns [`ThinError::RasterTooSmall`] if `input` is smaller than
    /// 3×3 — such a raster has no interior pixel to scan.
    pub fn new(input: GrayImage, polarity: Polarity, border: Level) -> Result<Self, ThinError> {
        let (width, height) = input.dimensions();
        if width < 3 || height < 3 {
            return Err(ThinError::RasterTooSmall { width, height });
        }
        Ok(Self {
            current: input,
            polarity,
            border,
            steps: Vec::new(),
            converged: false,
        })
    }

    /// Run one tick: the four directional sweeps against the frozen
    /// working raster, border application, buffer swap, and snapshot.
    ///
    /// Returns the per-direction removal counts. A tick that removes
    /// nothing converges the session; ticking a converged session is a
    /// no-op reporting zero removals and recording no snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ThinError::NotBinary`] on the first sampled pixel that
    /// violates the two-level invariant. The session is left as it was
    /// before the failing tick.
    pub fn tick(&mut self) -> Result<TickCounts, ThinError> {
        if self.converged {
            return Ok(TickCounts::default());
        }

        // Untouched interior pixels keep their prior value; the sweeps
        // only overwrite where a candidacy decision was made.
        let mut next = self.current.clone();
        let counts = TickCounts {
            north: scan::sweep(&self.current, &mut next, self.polarity, Direction::North)?,
            west: scan::sweep(&self.current, &mut next, self.polarity, Direction::West)?,
            east: scan::sweep(&self.current, &mut next, self.polarity, Direction::East)?,
            south: scan::sweep(&self.current, &mut next, self.polarity, Direction::South)?,
        };
        border::apply_border(&mut next, self.polarity, self.border);

        self.current = next;
        self.steps.push(self.current.clone());
        if counts.total() == 0 {
            self.converged = true;
        }
        Ok(counts)
    }

    /// Whether the session has reached its fixed point.
    #[must_use]
    pub const fn converged(&self) -> bool {
        self.converged
    }

    /// The configured polarity.
    #[must_use]
    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// The configured border level.
    #[must_use]
    pub const fn border(&self) -> Level {
        self.border
    }

    /// Snapshots of the ticks completed so far, in order.
    ///
    /// This is the partial history: it remains readable between ticks
    /// and after a failed tick, which is what makes manual tick driving
    /// useful for diagnosing a mis-binarized input.
    #[must_use]
    pub fn steps(&self) -> &[GrayImage] {
        &self.steps
    }

    /// Run any remaining ticks to convergence and return the completed
    /// history.
    ///
    /// Always performs at least one full tick, so the history has at
    /// least one step and its first step already reflects the border
    /// level even when no pixel was removable.
    ///
    /// # Errors
    ///
    /// Returns [`ThinError::NotBinary`] if any remaining tick fails
    /// validation; the history accumulated so far is discarded with the
    /// session.
    pub fn into_history(mut self) -> Result<StepHistory, ThinError> {
        while !self.converged {
            self.tick()?;
        }
        Ok(StepHistory::new(self.steps))
    }
}
