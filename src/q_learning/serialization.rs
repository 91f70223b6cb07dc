//! Versioned persistence envelope for trained Q-tables.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, q_learning::q_table::QTable};

/// Provenance stored alongside a saved table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Generations the table has been trained for, across resumed runs
    pub generations_trained: usize,
    /// Best episode score seen while training
    pub best_score: u32,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Timestamp when saved
    pub saved_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub table: QTable,
    pub metadata: TrainingMetadata,
}

impl SavedQTable {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(table: QTable, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            table,
            metadata,
        }
    }

    /// Reject envelopes written by an incompatible format version.
    pub fn check_version(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(())
    }

    pub fn into_table(self) -> Result<QTable> {
        self.check_version()?;
        Ok(self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, DiscreteState};

    #[test]
    fn test_msgpack_roundtrip_preserves_values() -> Result<()> {
        let mut table = QTable::new();
        let state = DiscreteState::new(4, 9).unwrap();
        table.set(state, Action::Jump, -587.25);

        let saved = SavedQTable::new(
            table,
            TrainingMetadata {
                generations_trained: 12,
                best_score: 3,
                seed: Some(7),
                saved_at: None,
            },
        );
        let bytes = rmp_serde::to_vec(&saved).map_err(|e| Error::SerializationContext {
            operation: "encode test table".to_string(),
            message: e.to_string(),
        })?;
        let loaded: SavedQTable =
            rmp_serde::from_slice(&bytes).map_err(|e| Error::SerializationContext {
                operation: "decode test table".to_string(),
                message: e.to_string(),
            })?;

        assert_eq!(loaded.metadata.generations_trained, 12);
        let table = loaded.into_table()?;
        assert_eq!(table.get(state, Action::Jump), -587.25);
        Ok(())
    }

    #[test]
    fn test_future_version_is_rejected() {
        let mut saved = SavedQTable::new(QTable::new(), TrainingMetadata::default());
        saved.version = 2;
        assert!(matches!(
            saved.into_table(),
            Err(Error::UnsupportedVersion {
                found: 2,
                expected: 1
            })
        ));
    }
}
