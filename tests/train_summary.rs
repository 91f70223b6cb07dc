use clap::Parser;
use flappy_ql::{
    adapters::MsgPackRepository,
    cli::commands::{
        evaluate::{self, EvaluateArgs},
        inspect::{self, InspectArgs},
        train::{TrainArgs, execute},
    },
    ports::QTableRepository,
};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "flappy-train",
        "--generations",
        "5",
        "--seed",
        "3",
        "--max-steps",
        "500",
        "--progress",
        "false",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["generations"], 5);
    assert_eq!(parsed["training"]["scores"].as_array().unwrap().len(), 5);
    assert_eq!(parsed["metadata"]["seed"], 3);
    assert_eq!(parsed["metrics"]["episodes"], 5);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "flappy-train",
        "--generations",
        "3",
        "--max-steps",
        "200",
        "--progress",
        "false",
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["generations"], 3);
}

#[test]
fn resumed_training_accumulates_generations() {
    let tmp = tempdir().unwrap();
    let table = tmp.path().join("table.msgpack");
    let config = tmp.path().join("run.json");
    std::fs::write(
        &config,
        r#"{"training": {"generations": 4, "max_steps_per_episode": 300}, "progress": false}"#,
    )
    .unwrap();

    execute(parse_args([
        "flappy-train",
        "--config",
        config.to_str().unwrap(),
        "--seed",
        "9",
        "--output",
        table.to_str().unwrap(),
    ]))
    .expect("first run should succeed");

    execute(parse_args([
        "flappy-train",
        "--config",
        config.to_str().unwrap(),
        "--generations",
        "2",
        "--input",
        table.to_str().unwrap(),
        "--output",
        table.to_str().unwrap(),
    ]))
    .expect("resumed run should succeed");

    let saved = MsgPackRepository::new().load(&table).unwrap();
    assert_eq!(saved.metadata.generations_trained, 6);
    assert_eq!(saved.metadata.seed, None);
    assert!(saved.metadata.saved_at.is_some());

    evaluate::execute(EvaluateArgs::parse_from([
        "flappy-evaluate",
        table.to_str().unwrap(),
        "--episodes",
        "2",
        "--max-steps",
        "300",
    ]))
    .expect("evaluation should succeed");

    inspect::execute(InspectArgs::parse_from([
        "flappy-inspect",
        table.to_str().unwrap(),
        "--values",
        "--encode",
        "300",
        "-48",
        "300",
    ]))
    .expect("inspection should succeed");
}

#[test]
fn zero_step_cap_is_rejected() {
    let args = parse_args(["flappy-train", "--generations", "1", "--max-steps", "0"]);
    assert!(execute(args).is_err());
}
