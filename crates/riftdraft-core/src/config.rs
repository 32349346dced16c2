// Configuration loading and parsing (riftdraft.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::draft::role::LaneFilter;

pub const CONFIG_FILE: &str = "riftdraft.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// riftdraft.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_paths: DataPaths,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
    #[serde(default)]
    pub matchups: MatchupDisplayConfig,
}

/// Data file locations, relative to the base directory unless absolute.
/// Only the roster is required; a table without a path is reported absent.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub roster: String,
    pub solo: Option<String>,
    pub synergy: Option<String>,
    pub matchup: Option<String>,
    pub combo: Option<String>,
    pub bans: Option<String>,
}

impl DataPaths {
    /// Resolve a configured path against `base_dir`.
    pub fn resolve(base_dir: &Path, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            base_dir.join(p)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    /// Synergy suggestions backed by fewer games are hidden.
    #[serde(default = "default_min_synergy_games")]
    pub min_synergy_games: u32,
    /// Maximum rows per panel.
    #[serde(default = "default_display_count")]
    pub display_count: usize,
    /// "ALL" or a role name.
    #[serde(default = "default_lane_filter")]
    pub lane_filter: String,
}

fn default_min_synergy_games() -> u32 {
    20
}

fn default_display_count() -> usize {
    12
}

fn default_lane_filter() -> String {
    "ALL".into()
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        RecommendationConfig {
            min_synergy_games: default_min_synergy_games(),
            display_count: default_display_count(),
            lane_filter: default_lane_filter(),
        }
    }
}

/// Which matchup classes the matchup panel lists.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchupDisplayConfig {
    #[serde(default = "default_true")]
    pub show_favorable: bool,
    #[serde(default = "default_true")]
    pub show_even: bool,
    #[serde(default = "default_true")]
    pub show_unfavorable: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MatchupDisplayConfig {
    fn default() -> Self {
        MatchupDisplayConfig {
            show_favorable: true,
            show_even: true,
            show_unfavorable: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/riftdraft.toml` relative to `base_dir`.
///
/// Does not copy defaults; startup goes through [`load_config_in`].
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Seed `config/riftdraft.toml` from `defaults/riftdraft.toml` when the
/// former is missing. Returns the written path, or `None` when a config
/// already exists.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{CONFIG_FILE} or defaults/{CONFIG_FILE} in {}; \
                 run from the project root or pass --base-dir",
                base_dir.display()
            ),
        });
    }

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;
    Ok(Some(target))
}

/// Load config relative to `base_dir`, seeding it from defaults first.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_file(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data_paths.roster.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_paths.roster".into(),
            message: "must not be empty".into(),
        });
    }

    let rec = &config.recommendations;
    if rec.min_synergy_games < 1 {
        return Err(ConfigError::ValidationError {
            field: "recommendations.min_synergy_games".into(),
            message: format!("must be >= 1, got {}", rec.min_synergy_games),
        });
    }
    if rec.display_count == 0 {
        return Err(ConfigError::ValidationError {
            field: "recommendations.display_count".into(),
            message: "must be > 0".into(),
        });
    }
    if let Err(e) = LaneFilter::parse(&rec.lane_filter) {
        return Err(ConfigError::ValidationError {
            field: "recommendations.lane_filter".into(),
            message: e.to_string(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
