//! Inspect command - Show what a saved table has learned

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use super::load_table;
use crate::{
    cli::output::{print_kv, print_section, print_subsection, render_policy_grid},
    q_learning::StateEncoder,
    world::{PipePair, WorldGeometry},
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a saved Q-table", allow_negative_numbers = true)]
pub struct InspectArgs {
    /// Path to a saved Q-table (.msgpack or .json)
    pub table: PathBuf,

    /// Print both action values for every visited state
    #[arg(long, default_value_t = false)]
    pub values: bool,

    /// Encode a bird height against a lower pipe: BIRD_Y PIPE_X GAP_BOTTOM
    #[arg(long, num_args = 3, value_names = ["BIRD_Y", "PIPE_X", "GAP_BOTTOM"])]
    pub encode: Option<Vec<f64>>,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let saved = load_table(&args.table)?;
    let metadata = saved.metadata.clone();
    let table = saved.into_table()?;

    print_section(&format!("Q-table: {}", args.table.display()));
    print_kv(
        "Generations trained",
        &metadata.generations_trained.to_string(),
    );
    print_kv("Best score", &metadata.best_score.to_string());
    if let Some(seed) = metadata.seed {
        print_kv("Seed", &seed.to_string());
    }
    print_kv("Visited states", &table.visited_states().to_string());

    print_subsection("Greedy policy (J = jump, . = no jump, ? = unvisited)");
    print!("{}", render_policy_grid(&table));

    if args.values {
        print_subsection("Action values");
        for (state, [no_jump, jump]) in table.iter() {
            if no_jump != 0.0 || jump != 0.0 {
                let label = state.to_string();
                println!("  {label:>8}  no-jump {no_jump:>10.2}  jump {jump:>10.2}");
            }
        }
    }

    if let Some(values) = &args.encode {
        let [bird_y, pipe_x, gap_bottom] = values[..] else {
            bail!("--encode takes exactly three values");
        };
        let geometry = WorldGeometry::default();
        let pipe = PipePair {
            x: pipe_x,
            gap_top: gap_bottom - geometry.gap_height,
            gap_bottom,
            scored: false,
            spawned_successor: false,
        };
        let encoder = StateEncoder::default();
        let (raw_x, raw_y) = encoder.raw_buckets(bird_y, &pipe);
        let state = encoder.encode(bird_y, &pipe);

        print_subsection("Encoding");
        print_kv("Raw buckets", &format!("({raw_x}, {raw_y})"));
        print_kv("State", &state.to_string());
        print_kv("Greedy action", &table.greedy_action(state).to_string());
        let [no_jump, jump] = table.values(state);
        print_kv("Values", &format!("no-jump {no_jump:.2}, jump {jump:.2}"));
    }

    Ok(())
}
