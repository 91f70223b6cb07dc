//! Run configuration shared across CLI commands
//!
//! A JSON file passed with `--config` fills these structs; any field left out
//! keeps its default, and command-line flags override both.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, pipeline::TrainingConfig};

/// Evaluation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Number of evaluation episodes
    pub episodes: usize,

    /// Step cap per evaluation episode
    pub max_steps_per_episode: Option<u64>,

    /// Gap seed for evaluation; falls back to the training seed
    pub seed: Option<u64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            episodes: 10,
            max_steps_per_episode: Some(10_000),
            seed: None,
        }
    }
}

/// Everything a `--config` file may set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub training: TrainingConfig,

    pub evaluation: EvaluationConfig,

    /// Whether to show progress bars
    pub progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            training: TrainingConfig::default(),
            evaluation: EvaluationConfig::default(),
            progress: true,
        }
    }
}

impl RunConfig {
    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject settings no run can use.
    pub fn validate(&self) -> Result<()> {
        self.training.geometry.validate()?;
        if self.training.max_steps_per_episode == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "training.max_steps_per_episode must be positive".to_string(),
            });
        }
        if self.evaluation.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "evaluation.episodes must be positive".to_string(),
            });
        }
        if self.evaluation.max_steps_per_episode == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "evaluation.max_steps_per_episode must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{"training": {"generations": 7, "seed": 3}, "progress": false}"#,
        )
        .unwrap();

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.training.generations, 7);
        assert_eq!(config.training.seed, Some(3));
        assert!(!config.progress);
        assert_eq!(config.evaluation, EvaluationConfig::default());
        assert_eq!(config.training.geometry.gap_height, 150.0);
    }

    #[test]
    fn test_zero_episode_evaluation_is_rejected() {
        let mut config = RunConfig::default();
        config.evaluation.episodes = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_missing_file_defaults_only_without_path() {
        assert_eq!(RunConfig::load_or_default(None).unwrap(), RunConfig::default());
        assert!(RunConfig::load_or_default(Some(Path::new("/nonexistent/run.json"))).is_err());
    }
}
