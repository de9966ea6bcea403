//! studylog configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level studylog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudylogConfig {
    /// Path of the JSON study log.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Lowest final average that counts as passed.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,
    /// ECTS required for the degree.
    #[serde(default = "default_degree_ects")]
    pub degree_ects: u32,
    /// Semesters planned below this many ECTS get a warning.
    #[serde(default = "default_min_semester_ects")]
    pub min_semester_ects: u32,
    /// Number of assessment modules that completes the assessment stage.
    #[serde(default = "default_assessment_modules")]
    pub assessment_modules: usize,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("studylog.json")
}
fn default_pass_threshold() -> f64 {
    3.75
}
fn default_degree_ects() -> u32 {
    180
}
fn default_min_semester_ects() -> u32 {
    15
}
fn default_assessment_modules() -> usize {
    9
}

impl Default for StudylogConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            pass_threshold: default_pass_threshold(),
            degree_ects: default_degree_ects(),
            min_semester_ects: default_min_semester_ects(),
            assessment_modules: default_assessment_modules(),
        }
    }
}

/// Expand `${VAR}` references in a data file path. Substituted values are
/// taken literally; an unterminated `${` is left as is.
fn resolve_env_vars(s: &str) -> String {
    let mut resolved = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        resolved.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        resolved.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    resolved.push_str(rest);
    resolved
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studylog.toml` in the current directory
/// 2. `~/.config/studylog/config.toml`
///
/// `STUDYLOG_DATA` overrides the data file.
pub fn load_config() -> Result<StudylogConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StudylogConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studylog.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<StudylogConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => StudylogConfig::default(),
    };

    if let Ok(data) = std::env::var("STUDYLOG_DATA") {
        config.data_file = PathBuf::from(data);
    }

    config.data_file = PathBuf::from(resolve_env_vars(&config.data_file.to_string_lossy()));

    anyhow::ensure!(
        config.pass_threshold.is_finite(),
        "pass_threshold must be a finite number"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studylog"))
}
