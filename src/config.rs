//! User configuration stored in `~/.claude/claude-dashboard.local.json`.
//!
//! ```json
//! { "language": "auto", "plan": "max", "cache": { "ttlSeconds": 60 } }
//! ```
//!
//! Any subset of fields may be present; missing or unrecognized values keep
//! their defaults. An unreadable or malformed file means pure defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::claude_home;

pub const CONFIG_FILE_NAME: &str = "claude-dashboard.local.json";
pub const DEFAULT_TTL_SECONDS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ko,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Pro,
    #[default]
    Max,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub language: Language,
    pub plan: Plan,
    pub ttl_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::Auto,
            plan: Plan::Max,
            ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}

/// On-disk shape. Fields are loosely typed so one bad value does not discard
/// the rest of the file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    language: Option<serde_json::Value>,
    #[serde(default)]
    plan: Option<serde_json::Value>,
    #[serde(default)]
    cache: Option<CacheSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheSection {
    #[serde(default)]
    ttl_seconds: Option<serde_json::Value>,
}

impl Config {
    /// Parses a config document and merges it over the defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(raw).context("parse config json")?;
        let mut config = Config::default();

        if let Some(language) = file
            .language
            .and_then(|v| serde_json::from_value::<Language>(v).ok())
        {
            config.language = language;
        }
        if let Some(plan) = file.plan.and_then(|v| serde_json::from_value::<Plan>(v).ok()) {
            config.plan = plan;
        }
        if let Some(ttl) = file
            .cache
            .and_then(|c| c.ttl_seconds)
            .and_then(|v| v.as_u64())
        {
            config.ttl_seconds = ttl;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// Loads `path` (or the default location), falling back to defaults on any error.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            return Config::default();
        };
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "using default config");
                Config::default()
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    claude_home().map(|home| home.join(CONFIG_FILE_NAME))
}
