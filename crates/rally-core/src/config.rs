use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// File name of the project config looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "rally.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// CSV file to load when `--data` is not given. Relative paths resolve
    /// against the directory holding the config file.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub columns: ColumnConfig,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: default_delimiter(),
            columns: ColumnConfig::default(),
        }
    }
}

/// Header names for each field of a [`MatchRecord`](crate::record::MatchRecord).
///
/// Defaults follow the public ATP match dataset layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub tournament: String,
    pub category: String,
    pub date: String,
    pub player_a: String,
    pub player_b: String,
    pub winner: String,
    pub rank_a: String,
    pub rank_b: String,
    pub surface: String,
    pub round: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            tournament: "Tournament".to_string(),
            category: "Series".to_string(),
            date: "Date".to_string(),
            player_a: "Player_1".to_string(),
            player_b: "Player_2".to_string(),
            winner: "Winner".to_string(),
            rank_a: "Rank_1".to_string(),
            rank_b: "Rank_2".to_string(),
            surface: "Surface".to_string(),
            round: "Round".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_eigenvector_max_iter")]
    pub eigenvector_max_iter: usize,
    #[serde(default = "default_eigenvector_tolerance")]
    pub eigenvector_tolerance: f64,
    /// Default length of centrality rankings.
    #[serde(default = "default_top")]
    pub top: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            eigenvector_max_iter: default_eigenvector_max_iter(),
            eigenvector_tolerance: default_eigenvector_tolerance(),
            top: default_top(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    /// Dataset used when neither `--data` nor the project config names one.
    #[serde(default)]
    pub dataset: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
    /// Dataset path after CLI > project > user precedence.
    pub dataset_path: Option<PathBuf>,
}

/// Load the project config from `explicit` or from `rally.toml` in
/// `project_root`.
///
/// A missing default file yields defaults; a missing explicit file is an
/// error.
pub fn load_project_config(project_root: &Path, explicit: Option<&Path>) -> Result<ProjectConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = project_root.join(PROJECT_CONFIG_FILE);
            if !path.exists() {
                return Ok(ProjectConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut config = toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if let (Some(dataset), Some(base)) = (config.dataset.path.as_mut(), path.parent()) {
        if dataset.is_relative() {
            *dataset = base.join(&*dataset);
        }
    }

    Ok(config)
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("rally/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn resolve_config(
    project_root: &Path,
    explicit_config: Option<&Path>,
    cli_data: Option<&Path>,
    cli_json: bool,
) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root, explicit_config)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, user.output.clone(), env_format)?;

    let dataset_path = cli_data
        .map(Path::to_path_buf)
        .or_else(|| project.dataset.path.clone())
        .or_else(|| user.dataset.clone());

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
        dataset_path,
    })
}

fn resolve_output(
    cli_json: bool,
    user_output: Option<String>,
    env_format: Option<String>,
) -> Result<String> {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return Ok("json".to_string());
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return Ok(mode.to_string());
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return Ok(mode.to_string());
    }

    if std::io::stdout().is_terminal() {
        Ok("pretty".to_string())
    } else {
        Ok("text".to_string())
    }
}

const fn default_delimiter() -> char {
    ','
}

const fn default_eigenvector_max_iter() -> usize {
    1000
}

const fn default_eigenvector_tolerance() -> f64 {
    1.0e-6
}

const fn default_top() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("temp dir");
        let cfg = load_project_config(root.path(), None).expect("load should succeed");
        assert!(cfg.dataset.path.is_none());
        assert_eq!(cfg.dataset.delimiter, ',');
        assert_eq!(cfg.dataset.columns.winner, "Winner");
        assert_eq!(cfg.metrics.eigenvector_max_iter, 1000);
        assert_eq!(cfg.metrics.top, 5);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let root = tempfile::tempdir().expect("temp dir");
        let missing = root.path().join("nope.toml");
        assert!(load_project_config(root.path(), Some(&missing)).is_err());
    }

    #[test]
    fn project_config_overrides_columns_and_resolves_dataset() {
        let root = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            root.path().join(PROJECT_CONFIG_FILE),
            r#"
[dataset]
path = "data/matches.csv"
delimiter = ";"

[dataset.columns]
winner = "Victor"
date = "tourney_date"

[metrics]
top = 25
"#,
        )
        .expect("write config");

        let cfg = load_project_config(root.path(), None).expect("load should succeed");
        assert_eq!(cfg.dataset.delimiter, ';');
        assert_eq!(cfg.dataset.columns.winner, "Victor");
        assert_eq!(cfg.dataset.columns.date, "tourney_date");
        // Unmapped columns keep their defaults.
        assert_eq!(cfg.dataset.columns.player_a, "Player_1");
        assert_eq!(cfg.metrics.top, 25);
        assert_eq!(
            cfg.dataset.path,
            Some(root.path().join("data/matches.csv"))
        );
    }

    #[test]
    fn invalid_project_config_reports_path() {
        let root = tempfile::tempdir().expect("temp dir");
        std::fs::write(root.path().join(PROJECT_CONFIG_FILE), "[dataset\n").expect("write");
        let err = load_project_config(root.path(), None).expect_err("must fail");
        assert!(format!("{err:#}").contains("Failed to parse"));
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        let output = resolve_output(true, Some("pretty".to_string()), Some("text".to_string()))
            .expect("resolve should succeed");
        assert_eq!(output, "json");
    }

    #[test]
    fn env_overrides_user_config() {
        let output = resolve_output(false, Some("pretty".to_string()), Some("json".to_string()))
            .expect("resolve should succeed");
        assert_eq!(output, "json");
    }

    #[test]
    fn aliases_are_normalized() {
        let pretty = resolve_output(false, Some("table".to_string()), Some("human".to_string()))
            .expect("resolve should succeed");
        assert_eq!(pretty, "pretty");

        let text = resolve_output(false, Some("human".to_string()), Some("table".to_string()))
            .expect("resolve should succeed");
        assert_eq!(text, "text");
    }

    #[test]
    fn user_config_parses_output_and_dataset() {
        let cfg: UserConfig = toml::from_str(
            r#"
output = "json"
dataset = "/data/atp_tennis.csv"
"#,
        )
        .expect("parse");
        assert_eq!(cfg.output, Some("json".to_string()));
        assert_eq!(cfg.dataset, Some(PathBuf::from("/data/atp_tennis.csv")));
    }
}
