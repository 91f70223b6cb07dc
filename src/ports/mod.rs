//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the game core and its
//! collaborators. Following hexagonal architecture, these traits are owned by
//! the domain and implemented by adapters in the infrastructure layer.

pub mod controller;
pub mod gap_source;
pub mod observer;
pub mod repository;

pub use controller::Controller;
pub use gap_source::GapSource;
pub use observer::Observer;
pub use repository::QTableRepository;
