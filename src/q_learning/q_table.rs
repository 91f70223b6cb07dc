//! Dense action-value table over the 7×21 state grid

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    types::{Action, DiscreteState, STATE_COUNT, X_BUCKETS, Y_BUCKETS},
};

/// Q-table mapping (x bucket, y bucket, action) to an action value.
///
/// Shape is fixed at 7×21×2 and every entry starts at zero. Rows are stored
/// in [`DiscreteState::index`] order, one `[no_jump, jump]` pair per state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QTableRepr", into = "QTableRepr")]
pub struct QTable {
    values: Vec<[f64; 2]>,
}

#[derive(Serialize, Deserialize)]
struct QTableRepr {
    values: Vec<[f64; 2]>,
}

impl TryFrom<QTableRepr> for QTable {
    type Error = Error;

    fn try_from(repr: QTableRepr) -> Result<Self> {
        QTable::from_snapshot(repr.values)
    }
}

impl From<QTable> for QTableRepr {
    fn from(table: QTable) -> Self {
        Self {
            values: table.values,
        }
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

impl QTable {
    /// Create an all-zero table
    pub fn new() -> Self {
        Self {
            values: vec![[0.0; 2]; STATE_COUNT],
        }
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: DiscreteState, action: Action) -> f64 {
        self.values[state.index()][action.index()]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: DiscreteState, action: Action, value: f64) {
        self.values[state.index()][action.index()] = value;
    }

    /// Both action values for a state, `[no_jump, jump]`
    pub fn values(&self, state: DiscreteState) -> [f64; 2] {
        self.values[state.index()]
    }

    /// Largest action value in a state
    pub fn max_q(&self, state: DiscreteState) -> f64 {
        let [no_jump, jump] = self.values(state);
        no_jump.max(jump)
    }

    /// Greedy action: `Jump` only when its value is strictly larger.
    pub fn greedy_action(&self, state: DiscreteState) -> Action {
        let [no_jump, jump] = self.values(state);
        if jump > no_jump {
            Action::Jump
        } else {
            Action::NoJump
        }
    }

    /// Flat copy of all values, suitable for persistence.
    pub fn snapshot(&self) -> Vec<[f64; 2]> {
        self.values.clone()
    }

    /// Rebuild a table from a snapshot.
    ///
    /// # Errors
    ///
    /// Fails when the snapshot does not have exactly one pair per state or
    /// contains a non-finite value.
    pub fn from_snapshot(values: Vec<[f64; 2]>) -> Result<Self> {
        if values.len() != STATE_COUNT {
            return Err(Error::InvalidSnapshot {
                message: format!(
                    "expected {STATE_COUNT} state rows ({X_BUCKETS}x{Y_BUCKETS}), got {}",
                    values.len()
                ),
            });
        }
        if let Some(index) = values.iter().position(|pair| pair.iter().any(|v| !v.is_finite())) {
            return Err(Error::InvalidSnapshot {
                message: format!("non-finite value at state row {index}"),
            });
        }
        Ok(Self { values })
    }

    /// Iterate over every state with its action values.
    pub fn iter(&self) -> impl Iterator<Item = (DiscreteState, [f64; 2])> + '_ {
        DiscreteState::all().zip(self.values.iter().copied())
    }

    /// Preferred action per state, indexed `[x_bucket][y_bucket]`.
    pub fn policy_grid(&self) -> Vec<Vec<Action>> {
        let mut grid = vec![Vec::with_capacity(Y_BUCKETS); X_BUCKETS];
        for state in DiscreteState::all() {
            grid[state.x_bucket()].push(self.greedy_action(state));
        }
        grid
    }

    /// Number of states with at least one non-zero value.
    pub fn visited_states(&self) -> usize {
        self.values
            .iter()
            .filter(|pair| pair.iter().any(|&v| v != 0.0))
            .count()
    }

    /// Reset all values to zero (for starting a fresh run)
    pub fn reset(&mut self) {
        self.values.fill([0.0; 2]);
    }

    /// Get total number of Q-values stored
    pub fn size(&self) -> usize {
        self.values.len() * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(x: usize, y: usize) -> DiscreteState {
        DiscreteState::new(x, y).unwrap()
    }

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new();
        assert_eq!(qtable.size(), 294);
        assert_eq!(qtable.get(state(3, 7), Action::Jump), 0.0);
        assert_eq!(qtable.visited_states(), 0);
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new();
        qtable.set(state(6, 20), Action::Jump, 1.5);
        assert_eq!(qtable.get(state(6, 20), Action::Jump), 1.5);
        assert_eq!(qtable.get(state(6, 20), Action::NoJump), 0.0);
        assert_eq!(qtable.visited_states(), 1);
    }

    #[test]
    fn test_greedy_action_ties_resolve_to_no_jump() {
        let mut qtable = QTable::new();
        let s = state(2, 2);
        assert_eq!(qtable.greedy_action(s), Action::NoJump);

        qtable.set(s, Action::Jump, 4.0);
        qtable.set(s, Action::NoJump, 4.0);
        assert_eq!(qtable.greedy_action(s), Action::NoJump);

        qtable.set(s, Action::Jump, 4.5);
        assert_eq!(qtable.greedy_action(s), Action::Jump);
        assert_eq!(qtable.max_q(s), 4.5);
    }

    #[test]
    fn test_policy_grid_matches_greedy_action() {
        let mut qtable = QTable::new();
        qtable.set(state(1, 4), Action::Jump, 2.0);
        qtable.set(state(5, 19), Action::NoJump, -3.0);

        let grid = qtable.policy_grid();
        assert_eq!(grid.len(), X_BUCKETS);
        for s in DiscreteState::all() {
            assert_eq!(grid[s.x_bucket()][s.y_bucket()], qtable.greedy_action(s));
        }
        assert_eq!(grid[5][19], Action::Jump);
    }

    #[test]
    fn test_snapshot_rejects_wrong_shape() {
        assert!(QTable::from_snapshot(vec![[0.0; 2]; 10]).is_err());

        let mut values = vec![[0.0; 2]; STATE_COUNT];
        values[7][1] = f64::NAN;
        assert!(matches!(
            QTable::from_snapshot(values),
            Err(Error::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates_shape() {
        let bad = r#"{"values": [[0.0, 1.0]]}"#;
        assert!(serde_json::from_str::<QTable>(bad).is_err());

        let mut qtable = QTable::new();
        qtable.set(state(0, 0), Action::Jump, 15.0);
        let json = serde_json::to_string(&qtable).unwrap();
        let loaded: QTable = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, qtable);
    }
}
