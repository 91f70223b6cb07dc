//! Discretization of continuous geometry into table states

use serde::{Deserialize, Serialize};

use crate::{types::DiscreteState, world::PipePair};

/// Maps the bird's height and the lead lower pipe into a [`DiscreteState`].
///
/// Horizontal distance is the pipe's x clamped to `x_horizon`, so buckets
/// saturate while the pipe is still far away. Vertical distance is measured
/// from the bird's top edge up to the lower pipe's top edge; a bird below that
/// edge is folded into a disjoint range starting at `below_gap_offset`.
///
/// The raw arithmetic can leave the 7×21 grid at the edges of normal play
/// (a pipe sliding off the left edge gives negative x buckets). Buckets are
/// saturated into the grid rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateEncoder {
    pub x_horizon: f64,
    pub bucket_size: f64,
    pub below_gap_offset: f64,
}

impl Default for StateEncoder {
    fn default() -> Self {
        Self {
            x_horizon: 280.0,
            bucket_size: 40.0,
            below_gap_offset: 408.0,
        }
    }
}

impl StateEncoder {
    /// Bucket indices before saturation.
    pub fn raw_buckets(&self, bird_y: f64, lower_pipe: &PipePair) -> (i64, i64) {
        let x_raw = lower_pipe.x.min(self.x_horizon);
        let x_bucket = (x_raw / self.bucket_size).floor() as i64 - 1;

        let mut y_raw = lower_pipe.gap_bottom - bird_y;
        if y_raw < 0.0 {
            y_raw = y_raw.abs() + self.below_gap_offset;
        }
        let y_bucket = (y_raw / self.bucket_size).floor() as i64;

        (x_bucket, y_bucket)
    }

    /// Encode into the table grid.
    pub fn encode(&self, bird_y: f64, lower_pipe: &PipePair) -> DiscreteState {
        debug_assert!(
            bird_y.is_finite() && lower_pipe.x.is_finite() && lower_pipe.gap_bottom.is_finite(),
            "non-finite geometry: bird_y={bird_y}, pipe={lower_pipe:?}"
        );
        let (x_bucket, y_bucket) = self.raw_buckets(bird_y, lower_pipe);
        DiscreteState::saturating(x_bucket, y_bucket)
    }
}
