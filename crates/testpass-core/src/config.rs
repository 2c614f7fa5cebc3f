//! testpass configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level testpass configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestpassConfig {
    /// Fixed RNG seed; `None` draws a fresh seed for every attempt.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Attempt duration when the question set does not set its own.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// Output directory for submissions.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_time_limit() -> u64 {
    1800
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./testpass-results")
}

impl Default for TestpassConfig {
    fn default() -> Self {
        Self {
            seed: None,
            time_limit_secs: default_time_limit(),
            output_dir: default_output_dir(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `testpass.toml` in the current directory
/// 2. `~/.config/testpass/config.toml`
///
/// Environment variable overrides: `TESTPASS_SEED`, `TESTPASS_TIME_LIMIT_SECS`.
pub fn load_config() -> Result<TestpassConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TestpassConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("testpass.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<TestpassConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TestpassConfig::default(),
    };

    apply_env_overrides(config, |name| std::env::var(name).ok())
}

/// Apply `TESTPASS_*` overrides read through `lookup`.
fn apply_env_overrides(
    mut config: TestpassConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<TestpassConfig> {
    if let Some(seed) = lookup("TESTPASS_SEED") {
        config.seed = Some(
            seed.trim()
                .parse()
                .with_context(|| format!("invalid TESTPASS_SEED: {seed}"))?,
        );
    }

    if let Some(limit) = lookup("TESTPASS_TIME_LIMIT_SECS") {
        config.time_limit_secs = limit
            .trim()
            .parse()
            .with_context(|| format!("invalid TESTPASS_TIME_LIMIT_SECS: {limit}"))?;
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("testpass"))
}
