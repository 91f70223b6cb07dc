//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    types::{EpisodeEnd, EpisodeSummary, StepRecord},
};

/// Complete observation of one training episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeObservation {
    pub generation: usize,
    pub score: u32,
    pub steps: u64,
    pub jumps: u64,
    pub total_reward: f64,
    pub end: EpisodeEnd,
    /// Per-step records, present only when step recording is enabled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<StepRecord>,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    best_score: u32,
    last_score: u32,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            best_score: 0,
            last_score: 0,
        }
    }

    fn message(&self) -> String {
        format!("last: {} best: {}", self.last_score, self.best_score)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_generations: usize) -> Result<()> {
        let pb = ProgressBar::new(total_generations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} generations ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, generation: usize, summary: &EpisodeSummary) -> Result<()> {
        self.last_score = summary.score;
        self.best_score = self.best_score.max(summary.score);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(generation as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    scores: Vec<u32>,
    lengths: Vec<u64>,
    jumps: u64,
    collisions: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episodes(&self) -> usize {
        self.scores.len()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    pub fn mean_score(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.scores.iter().map(|&s| f64::from(s)).sum::<f64>() / self.scores.len() as f64
        }
    }

    /// Mean episode length in steps
    pub fn mean_length(&self) -> f64 {
        if self.lengths.is_empty() {
            0.0
        } else {
            self.lengths.iter().sum::<u64>() as f64 / self.lengths.len() as f64
        }
    }

    /// Fraction of steps on which the controller chose to jump
    pub fn jump_rate(&self) -> f64 {
        let steps: u64 = self.lengths.iter().sum();
        if steps == 0 {
            0.0
        } else {
            self.jumps as f64 / steps as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.episodes(),
            collisions: self.collisions,
            best_score: self.best_score(),
            mean_score: self.mean_score(),
            mean_length: self.mean_length(),
            jump_rate: self.jump_rate(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub collisions: usize,
    pub best_score: u32,
    pub mean_score: f64,
    pub mean_length: f64,
    pub jump_rate: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _generation: usize, summary: &EpisodeSummary) -> Result<()> {
        self.scores.push(summary.score);
        self.lengths.push(summary.steps);
        self.jumps += summary.jumps;
        if summary.end == EpisodeEnd::Collision {
            self.collisions += 1;
        }
        Ok(())
    }
}

/// JSONL observer - Exports one JSON object per episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
    record_steps: bool,
    current_records: Vec<StepRecord>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            record_steps: false,
            current_records: Vec::new(),
        })
    }

    /// Include every step record in each episode line.
    pub fn with_steps(mut self, record_steps: bool) -> Self {
        self.record_steps = record_steps;
        self
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _generation: usize) -> Result<()> {
        self.current_records.clear();
        Ok(())
    }

    fn on_step(&mut self, _generation: usize, record: &StepRecord) -> Result<()> {
        if self.record_steps {
            self.current_records.push(*record);
        }
        Ok(())
    }

    fn on_episode_end(&mut self, generation: usize, summary: &EpisodeSummary) -> Result<()> {
        let observation = EpisodeObservation {
            generation,
            score: summary.score,
            steps: summary.steps,
            jumps: summary.jumps,
            total_reward: summary.total_reward,
            end: summary.end,
            records: std::mem::take(&mut self.current_records),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ScoreRow {
    generation: usize,
    score: u32,
    steps: u64,
}

/// Score history observer - Writes `generation,score,steps` rows to CSV
///
/// This is the data a plotting layer would chart.
pub struct ScoreHistoryObserver {
    writer: csv::Writer<File>,
}

impl ScoreHistoryObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl Observer for ScoreHistoryObserver {
    fn on_episode_end(&mut self, generation: usize, summary: &EpisodeSummary) -> Result<()> {
        self.writer.serialize(ScoreRow {
            generation,
            score: summary.score,
            steps: summary.steps,
        })?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Milestone observer - Tracks key learning achievements
///
/// Records the first generation that passed any pipe, the first that reached
/// a target score, and the generation of the best score.
#[derive(Debug, Clone)]
pub struct MilestoneObserver {
    target_score: u32,
    first_score: Option<usize>,
    first_target: Option<usize>,
    best: Option<(usize, u32)>,
    generations: usize,
}

impl MilestoneObserver {
    pub fn new(target_score: u32) -> Self {
        Self {
            target_score,
            first_score: None,
            first_target: None,
            best: None,
            generations: 0,
        }
    }

    /// First generation with a positive score
    pub fn first_score(&self) -> Option<usize> {
        self.first_score
    }

    /// First generation reaching the target score
    pub fn first_target(&self) -> Option<usize> {
        self.first_target
    }

    /// Generation and value of the best score
    pub fn best(&self) -> Option<(usize, u32)> {
        self.best
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    /// Display milestone summary
    pub fn display_summary(&self) {
        println!("\n=== Learning Milestones ===");

        match self.first_score {
            Some(generation) => println!("  First pipe passed: generation {generation}"),
            None => println!("  First pipe passed: Not achieved"),
        }

        match self.first_target {
            Some(generation) => println!(
                "  Score {} reached: generation {generation} (of {})",
                self.target_score, self.generations
            ),
            None => println!("  Score {} reached: Not achieved", self.target_score),
        }

        if let Some((generation, score)) = self.best {
            println!("  Best score: {score} (generation {generation})");
        }
    }
}

impl Observer for MilestoneObserver {
    fn on_episode_end(&mut self, generation: usize, summary: &EpisodeSummary) -> Result<()> {
        self.generations = generation;
        let score = summary.score;

        if score > 0 && self.first_score.is_none() {
            self.first_score = Some(generation);
        }
        if score >= self.target_score && self.first_target.is_none() {
            self.first_target = Some(generation);
        }
        if self.best.is_none_or(|(_, best)| score > best) {
            self.best = Some((generation, score));
        }

        Ok(())
    }
}
