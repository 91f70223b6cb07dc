//! Episode and training pipeline
//!
//! This module provides:
//! - [`EpisodeRunner`], which plays one episode with any controller
//! - [`TrainingPipeline`], which sequences generations and notifies observers
//! - Observers for progress, metrics, JSONL and CSV export, and milestones
//! - Non-learning controllers for evaluation

pub mod controllers;
pub mod episode;
pub mod observers;
pub mod training;

pub use controllers::{FrozenController, ScriptedController};
pub use episode::EpisodeRunner;
pub use observers::{
    EpisodeObservation, JsonlObserver, MetricsObserver, MetricsSummary, MilestoneObserver,
    ProgressObserver, ScoreHistoryObserver,
};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::{
    ports::{Controller, Observer},
    types::{EpisodeEnd, EpisodeSummary, StepRecord, Transition},
};
