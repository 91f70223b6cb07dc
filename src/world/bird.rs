//! Bird kinematics

use serde::{Deserialize, Serialize};

use super::geometry::WorldGeometry;
use crate::types::Action;

/// Vertical state of the bird. The horizontal position is fixed by the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdState {
    /// Top edge, pixels from the top of the screen
    pub y: f64,
    /// Vertical velocity, positive is downward
    pub velocity: f64,
    /// Whether the most recent step applied a flap
    pub flapped: bool,
}

impl BirdState {
    /// Bird as it appears at the start of an episode.
    pub fn spawn(geometry: &WorldGeometry) -> Self {
        Self {
            y: geometry.bird_start_y,
            velocity: geometry.bird_start_velocity,
            flapped: false,
        }
    }

    /// Bird hovering at `y` with zero velocity.
    pub fn at_rest(y: f64) -> Self {
        Self {
            y,
            velocity: 0.0,
            flapped: false,
        }
    }

    /// Apply the step's action to the velocity.
    ///
    /// A jump only flaps while the bird is below the ceiling. Gravity is skipped
    /// on the step that flaps.
    pub(crate) fn apply_action(&mut self, action: Action, geometry: &WorldGeometry) {
        self.flapped = false;
        if action.is_jump() && self.y > 0.0 {
            self.velocity = geometry.flap_impulse;
            self.flapped = true;
        }
        if !self.flapped && self.velocity < geometry.max_velocity {
            self.velocity = (self.velocity + geometry.gravity).min(geometry.max_velocity);
        }
    }

    /// Move by the current velocity without passing the ground line.
    pub(crate) fn integrate(&mut self, geometry: &WorldGeometry) {
        self.y += self.velocity.min(geometry.floor_y() - self.y);
    }
}
