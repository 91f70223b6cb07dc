//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Adapters depend on domain ports, not the other way
//! around.

pub mod gap_sources;
pub mod in_memory_repository;
pub mod json_repository;
pub mod msgpack_repository;

use std::path::Path;

pub use gap_sources::{RngGapSource, ScriptedGapSource};
pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

use crate::ports::QTableRepository;

/// Pick a file-backed repository from the path's extension.
///
/// `.json` selects [`JsonRepository`]; anything else is MessagePack.
pub fn repository_for_path(path: &Path) -> Box<dyn QTableRepository> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Box::new(JsonRepository::new())
    } else {
        Box::new(MsgPackRepository::new())
    }
}
