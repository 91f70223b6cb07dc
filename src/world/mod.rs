//! The game world: geometry, bird kinematics, pipes, and the episode simulator
//!
//! The simulator is pacing-agnostic: it advances one fixed timestep per call
//! and can be stepped as fast as a training loop wants. Rendering, frame-rate
//! pacing, and input handling belong to whatever drives it.

pub mod bird;
pub mod geometry;
pub mod pipes;
pub mod simulator;

pub use bird::BirdState;
pub use geometry::WorldGeometry;
pub use pipes::{PipePair, PipeTrack};
pub use simulator::{EpisodeStatus, Simulator, StepOutcome};
