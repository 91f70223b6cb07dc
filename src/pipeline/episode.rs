//! Episode runner: one playthrough from spawn to collision

use log::trace;

use crate::{
    Result,
    ports::{Controller, GapSource, Observer},
    q_learning::{QLearningAgent, QTable, StateEncoder, reward_for},
    types::{EpisodeEnd, EpisodeSummary, StepRecord, Transition},
    world::{Simulator, WorldGeometry},
};

/// Drives episodes end to end: encode, act, step, encode, reward, observe.
///
/// The runner owns the gap source, so consecutive episodes continue the same
/// random stream. It knows nothing about rendering, pacing, or persistence.
#[derive(Debug, Clone)]
pub struct EpisodeRunner<G> {
    geometry: WorldGeometry,
    encoder: StateEncoder,
    gaps: G,
    max_steps: Option<u64>,
}

impl<G: GapSource> EpisodeRunner<G> {
    /// Create a runner, validating the geometry up front.
    pub fn new(geometry: WorldGeometry, gaps: G) -> Result<Self> {
        geometry.validate()?;
        Ok(Self {
            geometry,
            encoder: StateEncoder::default(),
            gaps,
            max_steps: None,
        })
    }

    /// Stop episodes that survive `max_steps` steps.
    ///
    /// A capped episode ends as [`EpisodeEnd::StepLimit`] and gets no
    /// collision update.
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_encoder(mut self, encoder: StateEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn geometry(&self) -> &WorldGeometry {
        &self.geometry
    }

    pub fn encoder(&self) -> &StateEncoder {
        &self.encoder
    }

    pub fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    /// Fresh episode handle drawing gaps from this runner's source, for
    /// callers that want to drive the steps themselves.
    pub fn new_episode(&mut self) -> Result<Simulator<&mut G>> {
        Simulator::new(self.geometry, &mut self.gaps)
    }

    /// Play one episode with `controller`, returning its summary.
    pub fn run(&mut self, controller: &mut dyn Controller) -> Result<EpisodeSummary> {
        self.run_observed(0, controller, &mut [])
    }

    /// Play one episode with a learning agent that takes over `q_table` for
    /// the duration and hands it back updated. Returns the final score.
    pub fn run_with_table(&mut self, q_table: &mut QTable) -> Result<u32> {
        let mut agent = QLearningAgent::from_q_table(std::mem::take(q_table));
        let result = self.run(&mut agent);
        *q_table = agent.into_q_table();
        Ok(result?.score)
    }

    /// Play one episode, reporting every step to `observers`.
    pub fn run_observed(
        &mut self,
        generation: usize,
        controller: &mut dyn Controller,
        observers: &mut [Box<dyn Observer>],
    ) -> Result<EpisodeSummary> {
        for observer in observers.iter_mut() {
            observer.on_episode_start(generation)?;
        }

        let encoder = self.encoder;
        let max_steps = self.max_steps;
        let mut sim = Simulator::new(self.geometry, &mut self.gaps)?;
        let mut jumps = 0;
        let mut total_reward = 0.0;

        let end = loop {
            if max_steps.is_some_and(|limit| sim.steps() >= limit) {
                break EpisodeEnd::StepLimit;
            }

            let prev = sim.discrete_state(&encoder);
            let action = controller.select_action(prev);
            let outcome = sim.step(action)?;
            let next = sim.discrete_state(&encoder);
            let reward = reward_for(outcome.collided);

            let transition = Transition {
                prev,
                action,
                reward,
                next,
                collided: outcome.collided,
            };
            controller.observe(&transition)?;

            if action.is_jump() {
                jumps += 1;
            }
            total_reward += reward;

            let bird = sim.bird();
            trace!(
                "step {}: {prev} -{action}-> {next} y={:.1} v={:.1} score={}",
                outcome.step, bird.y, bird.velocity, outcome.score
            );
            let record = StepRecord {
                step: outcome.step,
                transition,
                score: outcome.score,
                bird_y: bird.y,
                bird_velocity: bird.velocity,
            };
            for observer in observers.iter_mut() {
                observer.on_step(generation, &record)?;
            }

            if outcome.collided {
                break EpisodeEnd::Collision;
            }
        };

        let summary = EpisodeSummary {
            score: sim.score(),
            steps: sim.steps(),
            jumps,
            total_reward,
            end,
        };
        for observer in observers.iter_mut() {
            observer.on_episode_end(generation, &summary)?;
        }
        Ok(summary)
    }
}
