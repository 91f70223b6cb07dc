//! Saving and loading trained tables through every repository.

use std::path::Path;

use flappy_ql::{
    Error,
    adapters::{
        InMemoryRepository, JsonRepository, MsgPackRepository, ScriptedGapSource,
        repository_for_path,
    },
    pipeline::{TrainingConfig, TrainingPipeline},
    ports::QTableRepository,
    q_learning::{QLearningAgent, QTable, SavedQTable, TrainingMetadata},
};
use tempfile::TempDir;

fn trained_table() -> (QTable, u32) {
    let config = TrainingConfig {
        generations: 15,
        max_steps_per_episode: Some(2000),
        ..TrainingConfig::default()
    };
    let mut agent = QLearningAgent::new();
    let result = TrainingPipeline::new(config)
        .run_with_gaps(&mut agent, ScriptedGapSource::constant(150))
        .unwrap();
    (agent.into_q_table(), result.best_score)
}

fn saved() -> SavedQTable {
    let (table, best_score) = trained_table();
    SavedQTable::new(
        table,
        TrainingMetadata {
            generations_trained: 15,
            best_score,
            seed: None,
            saved_at: Some("1700000000".to_string()),
        },
    )
}

#[test]
fn test_file_repositories_roundtrip_trained_table() {
    let temp_dir = TempDir::new().unwrap();
    let saved = saved();
    assert!(saved.table.visited_states() > 0);

    let repos: [(Box<dyn QTableRepository>, &str); 2] = [
        (Box::new(MsgPackRepository::new()), "table.msgpack"),
        (Box::new(JsonRepository::new()), "table.json"),
    ];
    for (repo, name) in repos {
        let path = temp_dir.path().join(name);
        repo.save(&saved, &path).unwrap();
        assert_eq!(repo.load(&path).unwrap(), saved, "{name}");
    }
}

#[test]
fn test_repository_for_path_picks_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let saved = saved();

    let json_path = temp_dir.path().join("table.JSON");
    repository_for_path(&json_path).save(&saved, &json_path).unwrap();
    let text = std::fs::read_to_string(&json_path).unwrap();
    assert!(text.trim_start().starts_with('{'));
    assert_eq!(JsonRepository::new().load(&json_path).unwrap(), saved);

    let bin_path = temp_dir.path().join("table.bin");
    repository_for_path(&bin_path).save(&saved, &bin_path).unwrap();
    assert_eq!(MsgPackRepository::new().load(&bin_path).unwrap(), saved);
}

#[test]
fn test_snapshot_restores_identical_policy() {
    let (table, _) = trained_table();
    let restored = QTable::from_snapshot(table.snapshot()).unwrap();
    assert_eq!(restored.policy_grid(), table.policy_grid());
    assert_eq!(table.snapshot().len() * 2, 294);
}

#[test]
fn test_in_memory_repository_rejects_future_versions() {
    let repo = InMemoryRepository::new();
    let mut future = saved();
    future.version = SavedQTable::VERSION + 1;
    repo.save(&future, Path::new("future")).unwrap();

    assert!(matches!(
        repo.load(Path::new("future")),
        Err(Error::UnsupportedVersion { .. })
    ));
}
