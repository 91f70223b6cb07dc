//! Subcommands of the `flappy` binary

pub mod evaluate;
pub mod inspect;
pub mod train;

use std::path::Path;

use anyhow::{Context, Result};

use crate::{adapters::repository_for_path, q_learning::SavedQTable};

/// Load a saved table, choosing the format from the file extension.
pub(crate) fn load_table(path: &Path) -> Result<SavedQTable> {
    repository_for_path(path)
        .load(path)
        .with_context(|| format!("Failed to load Q-table from {}", path.display()))
}
