//! Repository port for Q-table persistence.
//!
//! This module defines the trait boundary between the learning core and the
//! storage layer. The table persists across episodes within a run; a
//! repository carries it across runs.

use std::path::Path;

use crate::{Result, q_learning::SavedQTable};

/// Port for persisting and loading saved Q-tables.
///
/// # Examples
///
/// ```no_run
/// use flappy_ql::adapters::MsgPackRepository;
/// use flappy_ql::ports::QTableRepository;
/// use flappy_ql::q_learning::{QTable, SavedQTable, TrainingMetadata};
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// let saved = SavedQTable::new(QTable::new(), TrainingMetadata::default());
/// repo.save(&saved, Path::new("table.msgpack"))?;
/// let loaded = repo.load(Path::new("table.msgpack"))?;
/// # Ok::<(), flappy_ql::Error>(())
/// ```
pub trait QTableRepository {
    /// Save a table to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, saved: &SavedQTable, path: &Path) -> Result<()>;

    /// Load a table from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is corrupted, contains a
    /// table of the wrong shape, or carries an unsupported format version.
    fn load(&self, path: &Path) -> Result<SavedQTable>;
}
