//! TOML-based engine configuration.
//!
//! Holds the tunables of the scheduling pipeline:
//! - Mandatory-need threshold and knapsack resolution
//! - Permutation-search cap for the order optimizer
//! - Minimum gap duration worth scheduling into
//! - Enrichment endpoint, timeout and on/off switch
//!
//! Configuration is stored at `~/.config/gapwise/config.toml`. The engine
//! never mutates it at runtime; a [`crate::SuggestionEngine`] is constructed
//! from a snapshot and holds configuration only.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

fn default_mandatory_need_threshold() -> f64 {
    1.0
}

fn default_permutation_limit() -> usize {
    8
}

fn default_knapsack_resolution_minutes() -> i64 {
    1
}

fn default_min_gap_minutes() -> i64 {
    5
}

fn default_enrichment_timeout_ms() -> u64 {
    1500
}

fn default_true() -> bool {
    true
}

/// Metadata-enrichment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Master switch; disabled means the heuristic fallback is used directly.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Enrichment endpoint URL (optional; unset behaves like disabled).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Upper bound on a single enrichment call.
    #[serde(default = "default_enrichment_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: None,
            timeout_ms: default_enrichment_timeout_ms(),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Suggestions with need at or above this value must run today.
    #[serde(default = "default_mandatory_need_threshold")]
    pub mandatory_need_threshold: f64,
    /// Hard cap on the candidate set explored by the order search.
    #[serde(default = "default_permutation_limit")]
    pub permutation_limit: usize,
    /// Discretization step for the knapsack capacity table (minutes).
    #[serde(default = "default_knapsack_resolution_minutes")]
    pub knapsack_resolution_minutes: i64,
    /// Gaps shorter than this are ignored entirely (minutes).
    #[serde(default = "default_min_gap_minutes")]
    pub min_gap_minutes: i64,
    /// Enrichment settings.
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mandatory_need_threshold: default_mandatory_need_threshold(),
            permutation_limit: default_permutation_limit(),
            knapsack_resolution_minutes: default_knapsack_resolution_minutes(),
            min_gap_minutes: default_min_gap_minutes(),
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Default config file location (`~/.config/gapwise/config.toml`).
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("gapwise")
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load_or_default() -> Self {
        Self::load_from(&Self::config_path()).unwrap_or_default()
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Persist to an explicit path, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
