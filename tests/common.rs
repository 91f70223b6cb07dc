//! Common test utilities shared by the integration tests.

#![allow(dead_code)]

use flappy_ql::{
    Action, DiscreteState,
    adapters::ScriptedGapSource,
    pipeline::EpisodeRunner,
    q_learning::QTable,
    world::WorldGeometry,
};

/// Gap offsets that move the gap around the whole legal range.
pub const VARIED_GAPS: [u32; 5] = [150, 40, 250, 100, 200];

/// Whether a state means the gap is below the bird (y bucket 0) or the bird
/// has fallen below the gap (folded range, bucket 10 and up).
pub fn wants_jump(state: DiscreteState) -> bool {
    state.y_bucket() == 0 || state.y_bucket() >= 10
}

/// Table preferring `Jump` exactly where [`wants_jump`] holds.
pub fn gap_chasing_table() -> QTable {
    let mut table = QTable::new();
    for state in DiscreteState::all() {
        let preferred = if wants_jump(state) {
            Action::Jump
        } else {
            Action::NoJump
        };
        table.set(state, preferred, 1.0);
    }
    table
}

/// Runner over the default geometry with a scripted gap sequence.
pub fn scripted_runner(offsets: &[u32]) -> EpisodeRunner<ScriptedGapSource> {
    EpisodeRunner::new(
        WorldGeometry::default(),
        ScriptedGapSource::new(offsets.to_vec()),
    )
    .expect("default geometry is valid")
}
