//! Deterministic fixed-timestep episode simulator

use serde::{Deserialize, Serialize};

use super::{bird::BirdState, geometry::WorldGeometry, pipes::PipeTrack};
use crate::{
    Error, Result,
    ports::GapSource,
    q_learning::StateEncoder,
    types::{Action, DiscreteState},
};

/// Lifecycle of one episode: `Running -> Collided`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeStatus {
    Running,
    Collided,
}

/// What happened during one call to [`Simulator::step`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub action: Action,
    /// Whether the flap actually took effect
    pub flapped: bool,
    /// Pipe pairs passed during this step
    pub pipes_passed: u32,
    /// Score after this step
    pub score: u32,
    pub collided: bool,
    /// Steps taken so far, including this one
    pub step: u64,
}

/// One episode: bird kinematics, the pipe window, scoring, and collision.
///
/// Each [`step`](Simulator::step) advances exactly one fixed timestep and is a
/// pure function of the current state, the action, and the gap source.
#[derive(Debug, Clone)]
pub struct Simulator<G> {
    geometry: WorldGeometry,
    gaps: G,
    bird: BirdState,
    pipes: PipeTrack,
    score: u32,
    steps: u64,
    status: EpisodeStatus,
}

impl<G: GapSource> Simulator<G> {
    /// Start a new episode. The two initial pipe pairs draw their gaps from `gaps`.
    pub fn new(geometry: WorldGeometry, mut gaps: G) -> Result<Self> {
        geometry.validate()?;
        let pipes = PipeTrack::new(&geometry, &mut gaps);
        Ok(Self {
            bird: BirdState::spawn(&geometry),
            geometry,
            gaps,
            pipes,
            score: 0,
            steps: 0,
            status: EpisodeStatus::Running,
        })
    }

    /// Replace the spawned bird, e.g. to start from rest.
    pub fn with_bird(mut self, bird: BirdState) -> Self {
        self.bird = bird;
        self
    }

    /// Replace the pipe window.
    pub fn with_pipes(mut self, pipes: PipeTrack) -> Self {
        self.pipes = pipes;
        self
    }

    /// Advance one timestep.
    ///
    /// Order: apply the action, integrate the bird, scroll and recycle pipes,
    /// count passed pipes, then test for collision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpisodeOver`] once the episode has collided.
    pub fn step(&mut self, action: Action) -> Result<StepOutcome> {
        if self.status == EpisodeStatus::Collided {
            return Err(Error::EpisodeOver { step: self.steps });
        }

        self.bird.apply_action(action, &self.geometry);
        self.bird.integrate(&self.geometry);
        self.pipes.advance(&self.geometry, &mut self.gaps);

        let pipes_passed = self.pipes.mark_passed(&self.geometry);
        self.score += pipes_passed;
        self.steps += 1;

        let collided = self.is_collision();
        if collided {
            self.status = EpisodeStatus::Collided;
        }

        Ok(StepOutcome {
            action,
            flapped: self.bird.flapped,
            pipes_passed,
            score: self.score,
            collided,
            step: self.steps,
        })
    }

    /// Ground, ceiling, or pipe contact at the current position.
    pub fn is_collision(&self) -> bool {
        let y = self.bird.y;
        if y >= self.geometry.floor_y() || y < 0.0 {
            return true;
        }
        self.pipes
            .iter()
            .any(|pair| pair.overlaps_bird_column(&self.geometry) && pair.blocks(y, &self.geometry))
    }

    /// Encode the current position against the lead pipe.
    pub fn discrete_state(&self, encoder: &StateEncoder) -> DiscreteState {
        encoder.encode(self.bird.y, self.pipes.lead())
    }

    pub fn geometry(&self) -> &WorldGeometry {
        &self.geometry
    }

    pub fn bird(&self) -> &BirdState {
        &self.bird
    }

    pub fn pipes(&self) -> &PipeTrack {
        &self.pipes
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == EpisodeStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::ScriptedGapSource, world::PipePair};

    fn simulator(offsets: Vec<u32>) -> Simulator<ScriptedGapSource> {
        Simulator::new(WorldGeometry::default(), ScriptedGapSource::new(offsets)).unwrap()
    }

    #[test]
    fn test_episode_starts_running() {
        let sim = simulator(vec![150]);
        assert!(sim.is_running());
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.bird().y, 300.0);
        assert_eq!(sim.bird().velocity, -9.0);
        assert_eq!(sim.pipes().len(), 2);
    }

    #[test]
    fn test_free_fall_hits_the_ground() {
        let mut sim = simulator(vec![150]);
        let mut last = None;
        while sim.is_running() {
            last = Some(sim.step(Action::NoJump).unwrap());
        }
        let last = last.unwrap();
        assert!(last.collided);
        assert_eq!(last.step, 33);
        assert_eq!(sim.bird().y, sim.geometry().floor_y());
        assert_eq!(sim.status(), EpisodeStatus::Collided);
    }

    #[test]
    fn test_step_after_collision_is_rejected() {
        let mut sim = simulator(vec![150]);
        while sim.is_running() {
            sim.step(Action::NoJump).unwrap();
        }
        let steps = sim.steps();
        assert!(matches!(
            sim.step(Action::Jump),
            Err(Error::EpisodeOver { step }) if step == steps
        ));
        assert_eq!(sim.steps(), steps);
    }

    #[test]
    fn test_ceiling_collision() {
        let mut sim = simulator(vec![150]).with_bird(BirdState::at_rest(5.0));
        let outcome = sim.step(Action::Jump).unwrap();
        assert!(outcome.flapped);
        assert!(outcome.collided);
        assert_eq!(sim.bird().y, -3.0);
    }

    #[test]
    fn test_lower_pipe_collision() {
        let geometry = WorldGeometry::default();
        let pair = PipePair::with_offset(100.0, 50, &geometry); // gap 50..200
        let track = PipeTrack::from_pairs([pair]).unwrap();
        let mut sim = simulator(vec![150])
            .with_pipes(track)
            .with_bird(BirdState::at_rest(180.0));

        // Bird bottom at 181 + 24 > 200 and the column overlaps (|80 - 96| < 52)
        let outcome = sim.step(Action::NoJump).unwrap();
        assert!(outcome.collided);
    }

    #[test]
    fn test_upper_pipe_collision() {
        let geometry = WorldGeometry::default();
        let pair = PipePair::with_offset(100.0, 200, &geometry); // gap 200..350
        let track = PipeTrack::from_pairs([pair]).unwrap();
        let mut sim = simulator(vec![150])
            .with_pipes(track)
            .with_bird(BirdState::at_rest(150.0));

        assert!(sim.step(Action::NoJump).unwrap().collided);
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let geometry = WorldGeometry::default();
        let pair = PipePair::with_offset(100.0, 100, &geometry); // gap 100..250
        let track = PipeTrack::from_pairs([pair]).unwrap();
        let mut sim = simulator(vec![150])
            .with_pipes(track)
            .with_bird(BirdState::at_rest(150.0));

        assert!(!sim.step(Action::NoJump).unwrap().collided);
    }
}
