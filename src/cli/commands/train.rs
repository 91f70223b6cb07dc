//! Train command - Train a Q-learning agent over many generations

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use log::info;
use serde::Serialize;

use super::load_table;
use crate::{
    adapters::repository_for_path,
    cli::{
        config::RunConfig,
        output::{format_number, print_kv, print_section},
    },
    pipeline::{
        JsonlObserver, MetricsObserver, MetricsSummary, MilestoneObserver, ProgressObserver,
        ScoreHistoryObserver, TrainingPipeline, TrainingResult,
    },
    q_learning::{QLearningAgent, SavedQTable, TrainingMetadata},
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    metrics: MetricsSummary,
    metadata: SummaryMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    seed: Option<u64>,
    max_steps_per_episode: Option<u64>,
    resumed_from: Option<PathBuf>,
    generations_trained: usize,
    visited_states: usize,
}

pub(crate) fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

pub(crate) fn unix_timestamp() -> Option<String> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|elapsed| elapsed.as_secs().to_string())
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent")]
pub struct TrainArgs {
    /// Number of generations (episodes) to play
    #[arg(long, short = 'g')]
    pub generations: Option<usize>,

    /// Random seed for gap placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop any single episode after this many steps
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Resume training from a saved table
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Output file for the trained table (.msgpack or .json)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional CSV file for the per-generation score history
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Optional file for JSONL episode observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Include every step in the JSONL observations
    #[arg(long, default_value_t = false)]
    pub record_steps: bool,

    /// JSON run configuration; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Score reported as a learning milestone
    #[arg(long, default_value_t = 10)]
    pub milestone: u32,

    /// Show progress bar
    #[arg(long, action = ArgAction::Set)]
    pub progress: Option<bool>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut run = RunConfig::load_or_default(args.config.as_deref())
        .context("Failed to load run configuration")?;
    if let Some(generations) = args.generations {
        run.training.generations = generations;
    }
    if args.seed.is_some() {
        run.training.seed = args.seed;
    }
    if args.max_steps.is_some() {
        run.training.max_steps_per_episode = args.max_steps;
    }
    if let Some(progress) = args.progress {
        run.progress = progress;
    }
    run.validate()?;

    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    let (mut agent, prior) = match &args.input {
        Some(path) => {
            let saved = load_table(path)?;
            println!("Resuming from: {}", path.display());
            print_kv(
                "Generations trained",
                &saved.metadata.generations_trained.to_string(),
            );
            print_kv("Best score", &saved.metadata.best_score.to_string());
            let metadata = saved.metadata.clone();
            (QLearningAgent::from_q_table(saved.into_table()?), metadata)
        }
        None => (QLearningAgent::new(), TrainingMetadata::default()),
    };

    let training = run.training.clone();
    println!("\n=== Training Configuration ===");
    print_kv("Generations", &training.generations.to_string());
    print_kv(
        "Seed",
        &training
            .seed
            .map_or_else(|| "entropy".to_string(), |s| s.to_string()),
    );
    print_kv(
        "Step cap",
        &training
            .max_steps_per_episode
            .map_or_else(|| "none".to_string(), |n| n.to_string()),
    );

    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let milestones = Arc::new(Mutex::new(MilestoneObserver::new(args.milestone)));
    let mut pipeline = TrainingPipeline::new(training.clone())
        .with_observer(Box::new(metrics.clone()))
        .with_observer(Box::new(milestones.clone()));

    if run.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.history {
        let observer = ScoreHistoryObserver::new(path)
            .with_context(|| format!("Failed to create history file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create observations file {}", path.display()))?
            .with_steps(args.record_steps);
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(&mut agent)?;
    info!(
        "Training finished: {} generations, best score {}",
        result.generations, result.best_score
    );

    print_section("Training Complete");
    print_kv("Generations", &result.generations.to_string());
    print_kv("Best score", &result.best_score.to_string());
    print_kv("Mean score", &format!("{:.2}", result.mean_score));
    print_kv("Total steps", &format_number(result.total_steps));
    print_kv(
        "Visited states",
        &agent.q_table().visited_states().to_string(),
    );

    let metrics_summary = metrics
        .lock()
        .map_err(|_| anyhow!("metrics observer lock poisoned"))?
        .summary();
    print_kv("Jump rate", &format!("{:.3}", metrics_summary.jump_rate));

    milestones
        .lock()
        .map_err(|_| anyhow!("milestone observer lock poisoned"))?
        .display_summary();

    let generations_trained = prior.generations_trained + result.generations;

    if let Some(output_path) = &args.output {
        let metadata = TrainingMetadata {
            generations_trained,
            best_score: prior.best_score.max(result.best_score),
            seed: training.seed,
            saved_at: unix_timestamp(),
        };
        let saved = SavedQTable::new(agent.q_table().clone(), metadata);
        repository_for_path(output_path)
            .save(&saved, output_path)
            .with_context(|| format!("Failed to save Q-table to {}", output_path.display()))?;
        println!("\n✓ Q-table saved to: {}", output_path.display());
    }

    if let Some((summary_path, normalized)) = summary_spec {
        if normalized {
            println!(
                "\n⚠️  Normalizing summary path to {}",
                summary_path.display()
            );
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = TrainingSummaryFile {
            training: result,
            metrics: metrics_summary,
            metadata: SummaryMetadata {
                seed: training.seed,
                max_steps_per_episode: training.max_steps_per_episode,
                resumed_from: args.input.clone(),
                generations_trained,
                visited_states: agent.q_table().visited_states(),
            },
        };
        let file = std::fs::File::create(&summary_path)
            .with_context(|| format!("Failed to create {}", summary_path.display()))?;
        serde_json::to_writer_pretty(file, &summary)?;
        println!("Summary written to: {}", summary_path.display());
    }

    Ok(())
}
