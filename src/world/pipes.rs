//! Pipe pairs and the sliding window that scrolls them across the screen

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::geometry::WorldGeometry;
use crate::ports::GapSource;

/// An upper and a lower pipe sharing one horizontal position and one gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipePair {
    /// Left edge of both pipes
    pub x: f64,
    /// Bottom edge of the upper pipe
    pub gap_top: f64,
    /// Top edge of the lower pipe
    pub gap_bottom: f64,
    /// Set once the bird's midpoint has passed this pair's midpoint
    pub scored: bool,
    /// Set once this pair, as lead pipe, has triggered the next spawn
    pub spawned_successor: bool,
}

impl PipePair {
    /// Build a pair at `x` whose gap starts `offset` pixels below `gap_height`.
    pub fn with_offset(x: f64, offset: u32, geometry: &WorldGeometry) -> Self {
        let gap_bottom = geometry.gap_height + f64::from(offset);
        Self {
            x,
            gap_top: gap_bottom - geometry.gap_height,
            gap_bottom,
            scored: false,
            spawned_successor: false,
        }
    }

    /// Top edge of the upper pipe sprite.
    pub fn upper_y(&self, geometry: &WorldGeometry) -> f64 {
        self.gap_top - geometry.pipe_height
    }

    pub fn mid_x(&self, geometry: &WorldGeometry) -> f64 {
        self.x + geometry.pipe_width / 2.0
    }

    /// Whether the bird's column overlaps this pair's column.
    pub fn overlaps_bird_column(&self, geometry: &WorldGeometry) -> bool {
        (geometry.bird_x - self.x).abs() < geometry.pipe_width
    }

    /// Whether a bird with its top edge at `bird_y` touches either pipe,
    /// assuming the columns overlap.
    pub fn blocks(&self, bird_y: f64, geometry: &WorldGeometry) -> bool {
        bird_y < self.gap_top || bird_y + geometry.bird_height > self.gap_bottom
    }
}

/// Ordered window of pipe pairs: appended at the tail, removed from the head.
///
/// The window is never empty. The head is the pair the state encoder measures
/// against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeTrack {
    pairs: VecDeque<PipePair>,
}

impl PipeTrack {
    /// Lay out the pairs present at episode start.
    pub fn new<G: GapSource>(geometry: &WorldGeometry, gaps: &mut G) -> Self {
        let pairs = geometry
            .initial_pipe_x
            .iter()
            .map(|&x| spawn_pair(x, geometry, gaps))
            .collect();
        Self { pairs }
    }

    /// Build a track from explicit pairs, ordered left to right.
    ///
    /// Returns `None` when `pairs` is empty.
    pub fn from_pairs(pairs: impl IntoIterator<Item = PipePair>) -> Option<Self> {
        let pairs: VecDeque<_> = pairs.into_iter().collect();
        (!pairs.is_empty()).then_some(Self { pairs })
    }

    /// The oldest pair still on screen.
    pub fn lead(&self) -> &PipePair {
        &self.pairs[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PipePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Scroll every pair, spawn a successor when the lead crosses the trigger,
    /// and drop the lead once it has fully left the screen.
    pub(crate) fn advance<G: GapSource>(&mut self, geometry: &WorldGeometry, gaps: &mut G) {
        for pair in &mut self.pairs {
            pair.x += geometry.pipe_velocity;
        }

        let lead = &mut self.pairs[0];
        if !lead.spawned_successor && lead.x > 0.0 && lead.x < geometry.spawn_trigger_x {
            lead.spawned_successor = true;
            let pair = spawn_pair(geometry.pipe_spawn_x, geometry, gaps);
            self.pairs.push_back(pair);
        }

        if self.pairs.len() > 1 && self.pairs[0].x < -geometry.pipe_width {
            self.pairs.pop_front();
        }
    }

    /// Mark pairs whose midpoint the bird has reached; returns how many were newly passed.
    pub(crate) fn mark_passed(&mut self, geometry: &WorldGeometry) -> u32 {
        let bird_mid = geometry.bird_mid_x();
        let mut passed = 0;
        for pair in &mut self.pairs {
            if !pair.scored && pair.mid_x(geometry) <= bird_mid {
                pair.scored = true;
                passed += 1;
            }
        }
        passed
    }
}

fn spawn_pair<G: GapSource>(x: f64, geometry: &WorldGeometry, gaps: &mut G) -> PipePair {
    let range = geometry.gap_offset_range();
    let offset = gaps.next_below(range).min(range.saturating_sub(1));
    PipePair::with_offset(x, offset, geometry)
}
