//! Evaluate command - Play a saved table greedily without learning

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use serde::Serialize;

use super::load_table;
use crate::{
    adapters::RngGapSource,
    cli::{
        config::RunConfig,
        output::{format_number, print_kv, print_section, print_stats_table},
    },
    pipeline::{EpisodeRunner, FrozenController},
    types::EpisodeEnd,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a saved Q-table")]
pub struct EvaluateArgs {
    /// Path to a saved Q-table (.msgpack or .json)
    pub table: PathBuf,

    /// Number of evaluation episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Random seed for gap placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop any single episode after this many steps
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// JSON run configuration; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Export results to file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Outcome of an evaluation run
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub episodes: usize,
    pub scores: Vec<u32>,
    pub mean_score: f64,
    pub best_score: u32,
    pub min_score: u32,
    pub mean_steps: f64,
    /// Episodes stopped by the step cap rather than a collision
    pub capped: usize,
    pub seed: Option<u64>,
}

impl EvaluationReport {
    fn new(scores: Vec<u32>, steps: &[u64], capped: usize, seed: Option<u64>) -> Self {
        let episodes = scores.len();
        let mean = |total: f64| {
            if episodes == 0 {
                0.0
            } else {
                total / episodes as f64
            }
        };
        Self {
            episodes,
            mean_score: mean(scores.iter().map(|&s| f64::from(s)).sum()),
            best_score: scores.iter().copied().max().unwrap_or(0),
            min_score: scores.iter().copied().min().unwrap_or(0),
            mean_steps: mean(steps.iter().sum::<u64>() as f64),
            scores,
            capped,
            seed,
        }
    }
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let mut run = RunConfig::load_or_default(args.config.as_deref())
        .context("Failed to load run configuration")?;
    if let Some(episodes) = args.episodes {
        run.evaluation.episodes = episodes;
    }
    if args.seed.is_some() {
        run.evaluation.seed = args.seed;
    }
    if args.max_steps.is_some() {
        run.evaluation.max_steps_per_episode = args.max_steps;
    }
    run.validate()?;

    println!("Loading Q-table from: {}", args.table.display());
    let saved = load_table(&args.table)?;

    println!("\n=== Loaded Table Info ===");
    print_kv(
        "Generations trained",
        &saved.metadata.generations_trained.to_string(),
    );
    print_kv("Best score", &saved.metadata.best_score.to_string());
    if let Some(saved_at) = &saved.metadata.saved_at {
        print_kv("Saved at", saved_at);
    }

    let seed = run.evaluation.seed.or(run.training.seed);
    let mut runner = EpisodeRunner::new(run.training.geometry, RngGapSource::from_seed(seed))?
        .with_encoder(run.training.encoder);
    if let Some(max_steps) = run.evaluation.max_steps_per_episode {
        runner = runner.with_max_steps(max_steps);
    }

    let mut controller = FrozenController::new("Frozen", saved.into_table()?);
    let episodes = run.evaluation.episodes;
    info!("Evaluating for {episodes} episodes (seed: {seed:?})");

    let mut scores = Vec::with_capacity(episodes);
    let mut steps = Vec::with_capacity(episodes);
    let mut capped = 0;
    for episode in 1..=episodes {
        let summary = runner.run(&mut controller)?;
        debug!(
            "Episode {episode}: score {} in {} steps ({:?})",
            summary.score, summary.steps, summary.end
        );
        if summary.end == EpisodeEnd::StepLimit {
            capped += 1;
        }
        scores.push(summary.score);
        steps.push(summary.steps);
    }

    let report = EvaluationReport::new(scores, &steps, capped, seed);

    print_section("Evaluation Results");
    print_stats_table(&[
        ("Episodes", report.episodes.to_string()),
        ("Mean score", format!("{:.2}", report.mean_score)),
        ("Best score", report.best_score.to_string()),
        ("Min score", report.min_score.to_string()),
        ("Mean steps", format!("{:.1}", report.mean_steps)),
        ("Reached step cap", report.capped.to_string()),
        ("Total steps", format_number(steps.iter().sum())),
    ]);

    if let Some(export_path) = &args.export {
        let file = std::fs::File::create(export_path)
            .with_context(|| format!("Failed to create {}", export_path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
        println!("\nResults exported to: {}", export_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_statistics() {
        let report = EvaluationReport::new(vec![2, 0, 7], &[100, 33, 500], 1, Some(5));
        assert_eq!(report.best_score, 7);
        assert_eq!(report.min_score, 0);
        assert!((report.mean_score - 3.0).abs() < 1e-9);
        assert!((report.mean_steps - 211.0).abs() < 1e-9);
        assert_eq!(report.capped, 1);
    }
}
