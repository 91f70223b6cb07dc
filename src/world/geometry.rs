//! World geometry and kinematic constants

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Screen dimensions, sprite extents, and the kinematic constants of one world.
///
/// All lengths are pixels with y growing downward. Sprite sizes are used only
/// for collision extents and the scoring midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGeometry {
    pub screen_width: f64,
    pub screen_height: f64,
    /// Ground line; the bird collides once its bottom edge reaches it
    pub base_y: f64,
    /// Height of the ground sprite, which shrinks the gap placement range
    pub base_height: f64,
    /// Fixed horizontal position of the bird's left edge
    pub bird_x: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub pipe_width: f64,
    pub pipe_height: f64,
    /// Vertical size of the opening between upper and lower pipe
    pub gap_height: f64,
    /// Horizontal pipe displacement per step (negative moves left)
    pub pipe_velocity: f64,
    /// Where new pipe pairs appear
    pub pipe_spawn_x: f64,
    /// The lead pipe triggers a spawn once its x drops below this
    pub spawn_trigger_x: f64,
    /// Positions of the two pairs present at episode start
    pub initial_pipe_x: [f64; 2],
    pub bird_start_y: f64,
    pub bird_start_velocity: f64,
    /// Velocity added per step when not flapping
    pub gravity: f64,
    /// Downward velocity ceiling
    pub max_velocity: f64,
    /// Velocity set by a flap
    pub flap_impulse: f64,
}

impl Default for WorldGeometry {
    fn default() -> Self {
        let screen_width = 400.0;
        let screen_height = 600.0;
        Self {
            screen_width,
            screen_height,
            base_y: screen_height * 0.8,
            base_height: 112.0,
            bird_x: (screen_width / 5.0).floor(),
            bird_width: 34.0,
            bird_height: 24.0,
            pipe_width: 52.0,
            pipe_height: 320.0,
            gap_height: (screen_height / 4.0).floor(),
            pipe_velocity: -4.0,
            pipe_spawn_x: screen_width + 300.0,
            spawn_trigger_x: 5.0,
            initial_pipe_x: [screen_width + 200.0, screen_width + 500.0],
            bird_start_y: (screen_height / 2.0).floor(),
            bird_start_velocity: -9.0,
            gravity: 1.0,
            max_velocity: 10.0,
            flap_impulse: -8.0,
        }
    }
}

impl WorldGeometry {
    /// Lowest y the bird's top edge can reach before touching the ground.
    pub fn floor_y(&self) -> f64 {
        self.base_y - self.bird_height
    }

    /// Exclusive upper bound for the random gap offset.
    ///
    /// The lower pipe's top edge is placed at `gap_height + offset`.
    pub fn gap_offset_range(&self) -> u32 {
        let range = (self.screen_height - self.base_height - 1.2 * self.gap_height).floor();
        if range >= 1.0 { range as u32 } else { 0 }
    }

    /// Horizontal midpoint of the bird, used for scoring.
    pub fn bird_mid_x(&self) -> f64 {
        self.bird_x + self.bird_width / 2.0
    }

    /// Check that the geometry describes a playable world.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_width", self.pipe_width),
            ("pipe_height", self.pipe_height),
            ("gap_height", self.gap_height),
            ("gravity", self.gravity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive and finite, got {value}")));
            }
        }

        if !(self.base_y > self.bird_height && self.base_y <= self.screen_height) {
            return Err(invalid(format!(
                "base_y {} must lie between the bird height {} and the screen height {}",
                self.base_y, self.bird_height, self.screen_height
            )));
        }
        if !(self.pipe_velocity.is_finite() && self.pipe_velocity < 0.0) {
            return Err(invalid(format!(
                "pipe_velocity must be negative, got {}",
                self.pipe_velocity
            )));
        }
        if !(self.flap_impulse.is_finite() && self.flap_impulse < 0.0) {
            return Err(invalid(format!(
                "flap_impulse must be negative, got {}",
                self.flap_impulse
            )));
        }
        if !(self.max_velocity.is_finite() && self.max_velocity > 0.0) {
            return Err(invalid(format!(
                "max_velocity must be positive, got {}",
                self.max_velocity
            )));
        }
        if self.gap_offset_range() == 0 {
            return Err(invalid(format!(
                "gap_height {} leaves no room for gap placement",
                self.gap_height
            )));
        }
        if self.initial_pipe_x.iter().any(|x| !x.is_finite()) {
            return Err(invalid("initial pipe positions must be finite".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidGeometry { message }
}
