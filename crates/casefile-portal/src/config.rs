//! TOML configuration for the portal application.
//!
//! Every section has serde defaults, so an empty file (or a missing
//! optional section) yields the reference policy: 500-character
//! chunks, 3 retrieval candidates, a 300-character quote bound, a
//! 1000-record audit trail, and a 50-entry query history.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use casefile_core::{DEFAULT_AUDIT_CAPACITY, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_QUERY_CAPACITY};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Whole-blob JSON snapshot the portal reads at startup and
    /// rewrites after every mutation.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/portal.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHUNK_CHARS
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
    #[serde(default = "default_quote_max_chars")]
    pub quote_max_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            candidate_limit: default_candidate_limit(),
            quote_max_chars: default_quote_max_chars(),
        }
    }
}

fn default_candidate_limit() -> usize {
    3
}

fn default_quote_max_chars() -> usize {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,
    #[serde(default = "default_query_capacity")]
    pub query_capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            audit_capacity: default_audit_capacity(),
            query_capacity: default_query_capacity(),
        }
    }
}

fn default_audit_capacity() -> usize {
    DEFAULT_AUDIT_CAPACITY
}

fn default_query_capacity() -> usize {
    DEFAULT_QUERY_CAPACITY
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Origin marker stamped onto every audit record.
    #[serde(default = "default_origin")]
    pub origin: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
        }
    }
}

fn default_origin() -> String {
    "127.0.0.1".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.chunking.max_chars == 0 {
        anyhow::bail!("chunking.max_chars must be > 0");
    }
    if config.retrieval.candidate_limit == 0 {
        anyhow::bail!("retrieval.candidate_limit must be > 0");
    }
    if config.retrieval.quote_max_chars == 0 {
        anyhow::bail!("retrieval.quote_max_chars must be > 0");
    }
    if config.history.audit_capacity == 0 || config.history.query_capacity == 0 {
        anyhow::bail!("history capacities must be > 0");
    }

    Ok(config)
}
