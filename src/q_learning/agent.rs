//! Greedy tabular Q-learning agent
//!
//! The agent performs no epsilon exploration. Exploration comes from the
//! randomized gap placement and from collisions forcing restarts.

use crate::{
    Result,
    ports::Controller,
    q_learning::q_table::QTable,
    types::{Action, DiscreteState, Transition},
};

/// Learning rate α
pub const LEARNING_RATE: f64 = 0.6;

/// Reward for a step that does not end in collision
pub const ALIVE_REWARD: f64 = 15.0;

/// Reward for the step that collides
pub const COLLISION_REWARD: f64 = -1000.0;

/// Reward for a step given whether it collided.
///
/// The schedule is fixed and independent of the pipe-pass score.
pub fn reward_for(collided: bool) -> f64 {
    if collided {
        COLLISION_REWARD
    } else {
        ALIVE_REWARD
    }
}

/// Q-learning agent (off-policy TD control, undiscounted)
///
/// Owns the Q-table for the lifetime of a run; the table is never reset
/// between episodes.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    learning_rate: f64,
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl QLearningAgent {
    /// Create an agent with an all-zero table
    pub fn new() -> Self {
        Self::from_q_table(QTable::new())
    }

    /// Continue learning from an existing table
    pub fn from_q_table(q_table: QTable) -> Self {
        Self {
            q_table,
            learning_rate: LEARNING_RATE,
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn into_q_table(self) -> QTable {
        self.q_table
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Greedy action for a state; ties go to `NoJump`.
    pub fn select_action(&self, state: DiscreteState) -> Action {
        self.q_table.greedy_action(state)
    }

    /// One-step TD update of the acted entry only:
    ///
    /// Q(s,a) ← (1 - α) Q(s,a) + α [r + max_a' Q(s',a')]
    ///
    /// Returns the new value of `Q(prev, action)`.
    pub fn update(
        &mut self,
        prev: DiscreteState,
        action: Action,
        reward: f64,
        next: DiscreteState,
    ) -> f64 {
        let current = self.q_table.get(prev, action);
        let target = reward + self.q_table.max_q(next);
        let updated = (1.0 - self.learning_rate) * current + self.learning_rate * target;
        self.q_table.set(prev, action, updated);
        updated
    }
}

impl Controller for QLearningAgent {
    fn select_action(&mut self, state: DiscreteState) -> Action {
        QLearningAgent::select_action(self, state)
    }

    fn observe(&mut self, transition: &Transition) -> Result<()> {
        self.update(
            transition.prev,
            transition.action,
            transition.reward,
            transition.next,
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn q_table(&self) -> Option<&QTable> {
        Some(&self.q_table)
    }
}
