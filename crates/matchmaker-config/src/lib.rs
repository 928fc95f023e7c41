//! Configuration loading for Matchmaker.
//! Reads matchmaker.toml (or .yaml) from the current directory or the path in
//! the MATCHMAKER_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Snapshot the precomputed tables were built from.
pub const REFERENCE_SNAPSHOT_LABEL: &str = "20200723pubmed";
/// Total documents in [`REFERENCE_SNAPSHOT_LABEL`]. Not recomputed live.
pub const REFERENCE_CORPUS_SIZE: u64 = 9_680_305;

const DEFAULT_CONFIG_PATH: &str = "matchmaker.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    Missing(PathBuf),

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for matchmaker_common::MatchmakerError {
    fn from(err: ConfigError) -> Self {
        matchmaker_common::MatchmakerError::Config(err.to_string())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url() -> String { "sqlite://data/20200723pubmed.db?mode=ro".to_string() }
fn default_max_connections() -> u32 { 5 }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Where association scores come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Read materialised rows from `target_disease`.
    #[default]
    Precomputed,
    /// Count co-occurrences on the fly. Slow on large snapshots.
    Live,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub mode: RankingMode,
    #[serde(default = "default_snapshot_label")]
    pub corpus_snapshot: String,
    #[serde(default = "default_corpus_size")]
    pub corpus_size: u64,
    /// Let a request ask for live scores when the configured mode is precomputed.
    #[serde(default)]
    pub allow_live_override: bool,
}

fn default_snapshot_label() -> String { REFERENCE_SNAPSHOT_LABEL.to_string() }
fn default_corpus_size() -> u64 { REFERENCE_CORPUS_SIZE }

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            mode: RankingMode::default(),
            corpus_snapshot: default_snapshot_label(),
            corpus_size: default_corpus_size(),
            allow_live_override: false,
        }
    }
}

impl RankingConfig {
    /// Whether live scores may be computed, configured or per request.
    pub fn live_allowed(&self) -> bool {
        self.mode == RankingMode::Live || self.allow_live_override
    }

    pub fn snapshot(&self) -> CorpusSnapshot {
        CorpusSnapshot {
            label: self.corpus_snapshot.clone(),
            total_documents: self.corpus_size,
        }
    }
}

/// Corpus size (n1) pinned to the data snapshot it was counted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    pub label: String,
    pub total_documents: u64,
}

impl Default for CorpusSnapshot {
    fn default() -> Self {
        Self {
            label: REFERENCE_SNAPSHOT_LABEL.to_string(),
            total_documents: REFERENCE_CORPUS_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    #[serde(default = "default_suggestion_limit")]
    pub limit: usize,
}

fn default_suggestion_limit() -> usize { 5 }

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self { limit: default_suggestion_limit() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:3001".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}


impl Config {
    /// Load configuration.
    /// Checks MATCHMAKER_CONFIG first, then ./matchmaker.toml. A missing
    /// default file falls back to built-in defaults; a missing explicit one
    /// is an error.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match std::env::var("MATCHMAKER_CONFIG") {
            Ok(path) => Self::from_path(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_path(DEFAULT_CONFIG_PATH)?,
            Err(_) => {
                tracing::info!("No {DEFAULT_CONFIG_PATH} found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file; `.yaml`/`.yml` as YAML, anything else as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            _ => Self::from_toml_str(&content),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply MATCHMAKER_DATABASE_URL and MATCHMAKER_BIND.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("MATCHMAKER_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(bind) = lookup("MATCHMAKER_BIND") {
            self.server.bind = bind;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ranking.corpus_size == 0 {
            return Err(ConfigError::Invalid("ranking.corpus_size must be positive".into()));
        }
        if self.ranking.corpus_snapshot == REFERENCE_SNAPSHOT_LABEL
            && self.ranking.corpus_size != REFERENCE_CORPUS_SIZE
        {
            return Err(ConfigError::Invalid(format!(
                "ranking.corpus_size {} does not match snapshot {REFERENCE_SNAPSHOT_LABEL} ({REFERENCE_CORPUS_SIZE}); set ranking.corpus_snapshot too",
                self.ranking.corpus_size
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid("database.max_connections must be at least 1".into()));
        }
        if self.suggestions.limit == 0 {
            return Err(ConfigError::Invalid("suggestions.limit must be at least 1".into()));
        }
        Ok(())
    }
}
