//! Whole episodes: a hand-built table scores, and learning from zeros gets
//! past the first pipe.

mod common;

use common::{VARIED_GAPS, gap_chasing_table, scripted_runner, wants_jump};
use flappy_ql::{
    Action,
    pipeline::{EpisodeEnd, FrozenController, ScriptedController},
    q_learning::QLearningAgent,
};

#[test]
fn test_gap_chasing_table_scores() {
    flappy_ql::logging::init_test_logging();
    let mut runner = scripted_runner(&VARIED_GAPS).with_max_steps(2000);
    let mut controller = FrozenController::new("gap-chaser", gap_chasing_table());

    let summary = runner.run(&mut controller).unwrap();

    assert!(summary.score > 0, "summary: {summary:?}");
    assert_eq!(summary.end, EpisodeEnd::StepLimit);
}

#[test]
fn test_scripted_policy_matches_frozen_table() {
    let mut frozen_runner = scripted_runner(&VARIED_GAPS).with_max_steps(600);
    let mut closure_runner = scripted_runner(&VARIED_GAPS).with_max_steps(600);
    let mut frozen = FrozenController::new("table", gap_chasing_table());
    let mut scripted = ScriptedController::new("closure", |state| {
        if wants_jump(state) {
            Action::Jump
        } else {
            Action::NoJump
        }
    });

    let a = frozen_runner.run(&mut frozen).unwrap();
    let b = closure_runner.run(&mut scripted).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_learning_from_zeros_passes_a_pipe() {
    let mut runner = scripted_runner(&[150]).with_max_steps(5000);
    let mut agent = QLearningAgent::new();

    let scores: Vec<u32> = (0..40)
        .map(|_| runner.run(&mut agent).unwrap().score)
        .collect();

    assert_eq!(scores[0], 0);
    assert!(scores.iter().any(|&score| score > 0), "scores: {scores:?}");
}

#[test]
fn test_run_with_table_keeps_learning_across_episodes() {
    let mut runner = scripted_runner(&[150]).with_max_steps(5000);
    let mut table = flappy_ql::q_learning::QTable::new();

    let mut best = 0;
    for _ in 0..40 {
        best = best.max(runner.run_with_table(&mut table).unwrap());
    }
    assert!(best > 0);
    assert!(table.visited_states() > 10);
}
