//! Tabular Q-learning over the discretized game state
//!
//! This module holds the learning core of the game:
//!
//! - [`StateEncoder`] quantizes the bird's position relative to the lead lower
//!   pipe into a 7×21 grid
//! - [`QTable`] stores one value per (state, action) pair
//! - [`QLearningAgent`] acts greedily and applies the one-step update
//!
//! ## Update rule
//!
//! Q(s,a) ← 0.4 Q(s,a) + 0.6 [r + max_a' Q(s',a')]
//!
//! with r = +15 for surviving a step and r = −1000 for the step that collides.
//! There is no discount factor and no exploration rate.
//!
//! ## Usage Example
//!
//! ```no_run
//! use flappy_ql::{
//!     adapters::RngGapSource, pipeline::EpisodeRunner, q_learning::QLearningAgent,
//!     world::WorldGeometry,
//! };
//!
//! let mut runner = EpisodeRunner::new(WorldGeometry::default(), RngGapSource::seeded(42))?;
//! let mut agent = QLearningAgent::new();
//! for generation in 1..=100 {
//!     let summary = runner.run(&mut agent)?;
//!     println!("generation {generation}: score {}", summary.score);
//! }
//! # Ok::<(), flappy_ql::Error>(())
//! ```

pub mod agent;
pub mod encoder;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::{ALIVE_REWARD, COLLISION_REWARD, LEARNING_RATE, QLearningAgent, reward_for};
pub use encoder::StateEncoder;
pub use q_table::QTable;
pub use serialization::{SavedQTable, TrainingMetadata};
