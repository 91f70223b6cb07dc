//! Tabular Q-learning for a side-scrolling pipe-dodging game
//!
//! This crate provides:
//! - A deterministic fixed-timestep simulator: bird kinematics, a sliding
//!   window of pipe pairs, scoring, and collision
//! - A 7×21 state encoder and a greedy Q-learning agent over it
//! - An episode runner and a training pipeline with composable observers
//! - Versioned Q-table persistence in MessagePack or JSON
//! - The `flappy` command-line tool for training, evaluation, and inspection
//!
//! The learning core never renders, paces frames, or reads input; anything
//! presentational drives a [`world::Simulator`] from the outside.

pub mod adapters;
pub mod cli;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;
pub mod world;

pub use error::{Error, Result};
pub use types::{Action, DiscreteState};
