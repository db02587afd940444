use crate::domain::constants::{GRID_X_OFFSETS, RECOMMENDATIONS_X_OFFSETS, Y_OFFSETS};
use crate::domain::models::{DisplayPoint, QuadrantCoordinate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Half-open stepped range `[start, end)`: `start`, `start + step`, ... below `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteppedRange {
    pub start: i32,
    pub end: i32,
    pub step: i32,
}

impl SteppedRange {
    /// Range below `center` described by `(start_offset, end_offset, step)`.
    pub fn below(center: i32, (from, to, step): (i32, i32, i32)) -> Self {
        Self {
            start: center - from,
            end: center - to,
            step,
        }
    }

    pub fn len(&self) -> usize {
        if self.end <= self.start || self.step <= 0 {
            return 0;
        }
        ((self.end - self.start + self.step - 1) / self.step) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn nth(&self, k: usize) -> Option<i32> {
        (k < self.len()).then(|| self.start + k as i32 * self.step)
    }
}

/// Where a mode may put a point inside its quadrant cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x_offsets: (i32, i32, i32),
    pub y_offsets: (i32, i32, i32),
}

impl Placement {
    pub const GRID: Placement = Placement {
        x_offsets: GRID_X_OFFSETS,
        y_offsets: Y_OFFSETS,
    };
    /// Wider horizontal spread for the larger recommendation markers.
    pub const RECOMMENDATIONS: Placement = Placement {
        x_offsets: RECOMMENDATIONS_X_OFFSETS,
        y_offsets: Y_OFFSETS,
    };

    pub fn x_range(&self, center: QuadrantCoordinate) -> SteppedRange {
        SteppedRange::below(center.x, self.x_offsets)
    }

    pub fn y_range(&self, center: QuadrantCoordinate) -> SteppedRange {
        SteppedRange::below(center.y, self.y_offsets)
    }
}

/// Spreads co-located observations across their quadrant cell.
///
/// Points are drawn independently per axis, so two observations can still
/// land on the same spot; there is no pairwise distance check.
pub struct JitterPlacer<R: Rng = StdRng> {
    rng: R,
}

impl JitterPlacer<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> JitterPlacer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn place(&mut self, center: QuadrantCoordinate, placement: Placement) -> DisplayPoint {
        let x = self.sample(placement.x_range(center), center.x);
        let y = self.sample(placement.y_range(center), center.y);
        tracing::debug!(qx = center.x, qy = center.y, x, y, "placed point");
        DisplayPoint { x, y }
    }

    fn sample(&mut self, range: SteppedRange, fallback: i32) -> i32 {
        if range.is_empty() {
            return fallback;
        }
        let k = self.rng.gen_range(0..range.len());
        range.nth(k).unwrap_or(fallback)
    }
}
