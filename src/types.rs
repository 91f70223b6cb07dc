//! Shared value types for actions, discrete states, and episode records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of horizontal buckets in the discrete state grid
pub const X_BUCKETS: usize = 7;

/// Number of vertical buckets in the discrete state grid
pub const Y_BUCKETS: usize = 21;

/// Number of discrete states (`X_BUCKETS * Y_BUCKETS`)
pub const STATE_COUNT: usize = X_BUCKETS * Y_BUCKETS;

/// The single binary decision available each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    NoJump = 0,
    Jump = 1,
}

impl Action {
    /// Both actions in table order.
    pub const ALL: [Action; 2] = [Action::NoJump, Action::Jump];

    /// Column of this action in the Q-table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Action::NoJump),
            1 => Some(Action::Jump),
            _ => None,
        }
    }

    pub fn is_jump(self) -> bool {
        self == Action::Jump
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::NoJump => write!(f, "no-jump"),
            Action::Jump => write!(f, "jump"),
        }
    }
}

/// Bird position relative to the lead lower pipe, quantized into the 7×21 grid.
///
/// Fields are private so that every value in circulation is inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct DiscreteState {
    x_bucket: usize,
    y_bucket: usize,
}

impl DiscreteState {
    /// Create a state, returning `None` when either bucket lies outside the grid.
    pub fn new(x_bucket: usize, y_bucket: usize) -> Option<Self> {
        (x_bucket < X_BUCKETS && y_bucket < Y_BUCKETS).then_some(Self { x_bucket, y_bucket })
    }

    /// Create a state by saturating each bucket into the grid.
    pub fn saturating(x_bucket: i64, y_bucket: i64) -> Self {
        Self {
            x_bucket: x_bucket.clamp(0, X_BUCKETS as i64 - 1) as usize,
            y_bucket: y_bucket.clamp(0, Y_BUCKETS as i64 - 1) as usize,
        }
    }

    pub fn x_bucket(&self) -> usize {
        self.x_bucket
    }

    pub fn y_bucket(&self) -> usize {
        self.y_bucket
    }

    /// Row-major index (x bucket major, y bucket minor).
    pub fn index(&self) -> usize {
        self.x_bucket * Y_BUCKETS + self.y_bucket
    }

    /// Iterate over every state in row-major order.
    pub fn all() -> impl Iterator<Item = DiscreteState> {
        (0..X_BUCKETS).flat_map(|x_bucket| {
            (0..Y_BUCKETS).map(move |y_bucket| DiscreteState { x_bucket, y_bucket })
        })
    }
}

impl TryFrom<(usize, usize)> for DiscreteState {
    type Error = String;

    fn try_from((x_bucket, y_bucket): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(x_bucket, y_bucket).ok_or_else(|| {
            format!("state ({x_bucket}, {y_bucket}) outside the {X_BUCKETS}x{Y_BUCKETS} grid")
        })
    }
}

impl From<DiscreteState> for (usize, usize) {
    fn from(state: DiscreteState) -> Self {
        (state.x_bucket, state.y_bucket)
    }
}

impl fmt::Display for DiscreteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x_bucket, self.y_bucket)
    }
}

/// One observed step: the state before, the action taken, its reward, and the state after.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub prev: DiscreteState,
    pub action: Action,
    pub reward: f64,
    pub next: DiscreteState,
    pub collided: bool,
}

/// Per-step record handed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step number within the episode (1-based, after the step was applied)
    pub step: u64,
    pub transition: Transition,
    /// Score after this step
    pub score: u32,
    pub bird_y: f64,
    pub bird_velocity: f64,
}

/// Why an episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeEnd {
    /// The bird hit a pipe, the ground, or the ceiling
    Collision,
    /// The runner's step cap was reached first
    StepLimit,
}

/// Result of one episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Pipe pairs passed
    pub score: u32,
    pub steps: u64,
    pub jumps: u64,
    pub total_reward: f64,
    pub end: EpisodeEnd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_index_roundtrip() {
        for action in Action::ALL {
            assert_eq!(Action::from_index(action.index()), Some(action));
        }
        assert_eq!(Action::from_index(2), None);
        assert_eq!(Action::default(), Action::NoJump);
    }

    #[test]
    fn test_discrete_state_rejects_out_of_grid() {
        assert!(DiscreteState::new(6, 20).is_some());
        assert!(DiscreteState::new(7, 0).is_none());
        assert!(DiscreteState::new(0, 21).is_none());
    }

    #[test]
    fn test_saturating_clamps_both_axes() {
        let low = DiscreteState::saturating(-3, -1);
        assert_eq!((low.x_bucket(), low.y_bucket()), (0, 0));

        let high = DiscreteState::saturating(9, 40);
        assert_eq!((high.x_bucket(), high.y_bucket()), (6, 20));
    }

    #[test]
    fn test_all_states_are_row_major() {
        let states: Vec<_> = DiscreteState::all().collect();
        assert_eq!(states.len(), STATE_COUNT);
        for (i, state) in states.iter().enumerate() {
            assert_eq!(state.index(), i);
        }
    }

    #[test]
    fn test_deserialize_rejects_out_of_grid_state() {
        let state: DiscreteState = serde_json::from_str("[4, 12]").unwrap();
        assert_eq!(state, DiscreteState::new(4, 12).unwrap());
        assert!(serde_json::from_str::<DiscreteState>("[7, 0]").is_err());
    }
}
