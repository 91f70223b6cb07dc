//! Training pipeline: generations of episodes against one shared table

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::episode::EpisodeRunner;
use crate::{
    Result,
    adapters::RngGapSource,
    ports::{Controller, GapSource, Observer},
    q_learning::StateEncoder,
    world::WorldGeometry,
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of episodes to play
    pub generations: usize,

    /// Seed for gap placement; `None` draws from entropy
    pub seed: Option<u64>,

    /// Optional cap on steps per episode
    pub max_steps_per_episode: Option<u64>,

    pub geometry: WorldGeometry,

    pub encoder: StateEncoder,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            seed: None,
            max_steps_per_episode: None,
            geometry: WorldGeometry::default(),
            encoder: StateEncoder::default(),
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Generations played
    pub generations: usize,

    /// Score per generation, in order
    pub scores: Vec<u32>,

    /// Steps survived per generation
    pub steps: Vec<u64>,

    pub best_score: u32,

    pub mean_score: f64,

    pub total_steps: u64,

    /// First generation (1-based) with a positive score
    pub first_scoring_generation: Option<usize>,
}

impl TrainingResult {
    /// Build a result from per-generation scores and step counts
    pub fn new(scores: Vec<u32>, steps: Vec<u64>) -> Self {
        let generations = scores.len();
        let best_score = scores.iter().copied().max().unwrap_or(0);
        let mean_score = if generations > 0 {
            scores.iter().map(|&s| f64::from(s)).sum::<f64>() / generations as f64
        } else {
            0.0
        };
        let first_scoring_generation = scores.iter().position(|&s| s > 0).map(|i| i + 1);

        Self {
            generations,
            total_steps: steps.iter().sum(),
            scores,
            steps,
            best_score,
            mean_score,
            first_scoring_generation,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Runs a controller for a number of generations, notifying observers.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train with gaps drawn from a [`RngGapSource`] seeded from the config.
    pub fn run(&mut self, controller: &mut dyn Controller) -> Result<TrainingResult> {
        let gaps = RngGapSource::from_seed(self.config.seed);
        self.run_with_gaps(controller, gaps)
    }

    /// Train with an explicit gap source. One stream is shared by every
    /// generation of the run.
    pub fn run_with_gaps<G: GapSource>(
        &mut self,
        controller: &mut dyn Controller,
        gaps: G,
    ) -> Result<TrainingResult> {
        let mut runner =
            EpisodeRunner::new(self.config.geometry, gaps)?.with_encoder(self.config.encoder);
        if let Some(max_steps) = self.config.max_steps_per_episode {
            runner = runner.with_max_steps(max_steps);
        }

        let generations = self.config.generations;
        info!(
            "Training {} for {generations} generations (seed: {:?})",
            controller.name(),
            self.config.seed
        );

        for observer in &mut self.observers {
            observer.on_training_start(generations)?;
        }

        let mut scores = Vec::with_capacity(generations);
        let mut steps = Vec::with_capacity(generations);
        let mut best = 0;

        for generation in 1..=generations {
            let summary = runner.run_observed(generation, controller, &mut self.observers)?;
            best = best.max(summary.score);
            info!(
                "Generation {generation}: score {} (best {best}), {} steps",
                summary.score, summary.steps
            );
            debug!(
                "Generation {generation}: {} jumps, reward {:.1}, ended by {:?}",
                summary.jumps, summary.total_reward, summary.end
            );
            scores.push(summary.score);
            steps.push(summary.steps);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(scores, steps))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        adapters::ScriptedGapSource, q_learning::QLearningAgent, types::EpisodeSummary,
    };

    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl Observer for Recorder {
        fn on_training_start(&mut self, total: usize) -> Result<()> {
            self.0.lock().unwrap().push(format!("start {total}"));
            Ok(())
        }

        fn on_episode_start(&mut self, generation: usize) -> Result<()> {
            self.0.lock().unwrap().push(format!("begin {generation}"));
            Ok(())
        }

        fn on_episode_end(&mut self, generation: usize, _summary: &EpisodeSummary) -> Result<()> {
            self.0.lock().unwrap().push(format!("end {generation}"));
            Ok(())
        }

        fn on_training_end(&mut self) -> Result<()> {
            self.0.lock().unwrap().push("done".to_string());
            Ok(())
        }
    }

    #[test]
    fn test_training_pipeline_event_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let config = TrainingConfig {
            generations: 2,
            seed: Some(42),
            max_steps_per_episode: Some(50),
            ..TrainingConfig::default()
        };
        let mut pipeline =
            TrainingPipeline::new(config).with_observer(Box::new(Recorder(events.clone())));
        let mut agent = QLearningAgent::new();

        let result = pipeline.run(&mut agent).unwrap();

        assert_eq!(result.generations, 2);
        assert_eq!(result.scores.len(), 2);
        assert_eq!(
            *events.lock().unwrap(),
            vec!["start 2", "begin 1", "end 1", "begin 2", "end 2", "done"]
        );
    }

    #[test]
    fn test_agent_learns_to_pass_a_pipe() {
        let config = TrainingConfig {
            generations: 40,
            max_steps_per_episode: Some(5000),
            ..TrainingConfig::default()
        };
        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = QLearningAgent::new();

        let result = pipeline
            .run_with_gaps(&mut agent, ScriptedGapSource::constant(150))
            .unwrap();

        assert!(result.best_score >= 1);
        assert!(result.first_scoring_generation.is_some());
        assert_eq!(result.total_steps, result.steps.iter().sum::<u64>());
    }

    #[test]
    fn test_result_statistics() {
        let result = TrainingResult::new(vec![0, 0, 3, 1], vec![30, 40, 200, 90]);
        assert_eq!(result.best_score, 3);
        assert!((result.mean_score - 1.0).abs() < 1e-9);
        assert_eq!(result.total_steps, 360);
        assert_eq!(result.first_scoring_generation, Some(3));

        let empty = TrainingResult::new(Vec::new(), Vec::new());
        assert_eq!(empty.mean_score, 0.0);
        assert_eq!(empty.first_scoring_generation, None);
    }
}
