//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling the episode loop
//! to specific output formats or metrics.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    Result,
    types::{EpisodeSummary, StepRecord},
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different types of data during training:
/// progress bars, JSONL export, score history for plotting, milestone tracking.
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_generations)` - Once at the beginning
/// 2. For each generation:
///    - `on_episode_start(generation)`
///    - `on_step(generation, record)` - For each simulated step
///    - `on_episode_end(generation, summary)`
/// 3. `on_training_end()` - Once at the end
///
/// Generations are numbered from 1.
///
/// # Examples
///
/// ```no_run
/// use flappy_ql::{ports::Observer, types::EpisodeSummary};
///
/// struct BestScore {
///     best: u32,
/// }
///
/// impl Observer for BestScore {
///     fn on_episode_end(
///         &mut self,
///         _generation: usize,
///         summary: &EpisodeSummary,
///     ) -> flappy_ql::Result<()> {
///         self.best = self.best.max(summary.score);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_generations: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts.
    fn on_episode_start(&mut self, _generation: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every simulated step, once the controller has observed it.
    fn on_step(&mut self, _generation: usize, _record: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends by collision or step limit.
    fn on_episode_end(&mut self, _generation: usize, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs, flush files, or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Shared observer: the pipeline gets one handle, the caller keeps another to
/// read results after training.
impl<O: Observer> Observer for Arc<Mutex<O>> {
    fn on_training_start(&mut self, total_generations: usize) -> Result<()> {
        let mut inner = self.lock().unwrap_or_else(PoisonError::into_inner);
        inner.on_training_start(total_generations)
    }

    fn on_episode_start(&mut self, generation: usize) -> Result<()> {
        let mut inner = self.lock().unwrap_or_else(PoisonError::into_inner);
        inner.on_episode_start(generation)
    }

    fn on_step(&mut self, generation: usize, record: &StepRecord) -> Result<()> {
        let mut inner = self.lock().unwrap_or_else(PoisonError::into_inner);
        inner.on_step(generation, record)
    }

    fn on_episode_end(&mut self, generation: usize, summary: &EpisodeSummary) -> Result<()> {
        let mut inner = self.lock().unwrap_or_else(PoisonError::into_inner);
        inner.on_episode_end(generation, summary)
    }

    fn on_training_end(&mut self) -> Result<()> {
        let mut inner = self.lock().unwrap_or_else(PoisonError::into_inner);
        inner.on_training_end()
    }
}
