use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::{ResumeRanker, TfidfVectorizer};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub vectorizer: VectorizerSettings,
    #[serde(default)]
    pub staging: StagingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Bounds applied to a ranking request before any work is done
#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_max_documents")]
    pub max_documents: usize,
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            max_documents: default_max_documents(),
            max_document_bytes: default_max_document_bytes(),
            max_results: None,
        }
    }
}

fn default_max_documents() -> usize { 100 }
fn default_max_document_bytes() -> usize { 10 * 1024 * 1024 }

#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerSettings {
    #[serde(default = "default_true")]
    pub stop_words: bool,
    #[serde(default = "default_true")]
    pub smooth_idf: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

impl Default for VectorizerSettings {
    fn default() -> Self {
        Self {
            stop_words: true,
            smooth_idf: true,
            sublinear_tf: false,
            min_token_len: default_min_token_len(),
        }
    }
}

impl From<&VectorizerSettings> for TfidfVectorizer {
    fn from(settings: &VectorizerSettings) -> Self {
        TfidfVectorizer {
            stop_words: settings.stop_words,
            smooth_idf: settings.smooth_idf,
            sublinear_tf: settings.sublinear_tf,
            min_token_len: settings.min_token_len.max(1),
        }
    }
}

fn default_true() -> bool { true }
fn default_min_token_len() -> usize { 2 }

/// Where uploads are staged; the system temp dir when unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StagingSettings {
    #[serde(default)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml), both optional
    /// 3. Environment variables (prefixed with RANKER__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RANKER__RANKING__MAX_DOCUMENTS -> ranking.max_documents
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Build the ranking orchestrator these settings describe
    pub fn ranker(&self) -> ResumeRanker {
        ResumeRanker::new((&self.vectorizer).into(), self.ranking.max_results)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("RANKER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
