//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const DEFAULT_ES_URL: &str = "http://localhost:9200";
pub const DEFAULT_INDEX_NAME: &str = "network-logs";
pub const DEFAULT_INPUT_PATH: &str = "./updated_cybersecurity_attacks.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "./network_logs_bulk.jsonl";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Search datastore base URL
    pub es_url: String,

    /// Target index for both the mapping and the bulk action lines
    pub index_name: String,

    /// CSV source file
    pub input_path: PathBuf,

    /// NDJSON output file
    pub output_path: PathBuf,

    /// HTTP timeout in seconds
    pub timeout_seconds: u64,

    /// Optional basic auth credentials
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            es_url: DEFAULT_ES_URL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            username: None,
            password: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            es_url: get("ES_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.es_url),

            index_name: get("INDEX_NAME").unwrap_or(defaults.index_name),

            input_path: get("INPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),

            output_path: get("OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),

            timeout_seconds: get("ES_TIMEOUT_SECONDS")
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_seconds),

            username: get("ES_USERNAME"),
            password: get("ES_PASSWORD"),
        }
    }

    /// Checks shared by every command; the transform needs nothing else
    pub fn validate_index(&self) -> AppResult<()> {
        validate_index_name(&self.index_name)
    }

    /// Reject datastore settings the server would refuse anyway
    pub fn validate(&self) -> AppResult<()> {
        self.validate_index()?;

        if self.timeout_seconds == 0 {
            return Err(AppError::Config("ES_TIMEOUT_SECONDS must be greater than 0".into()));
        }

        if self.password.is_some() && self.username.is_none() {
            return Err(AppError::Config("ES_PASSWORD is set without ES_USERNAME".into()));
        }

        Ok(())
    }
}

/// Index names must be lowercase and free of path-like characters
fn validate_index_name(name: &str) -> AppResult<()> {
    const FORBIDDEN: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':'];

    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::Config(format!("invalid index name '{}'", name)));
    }
    if name.starts_with(['-', '_', '+']) {
        return Err(AppError::Config(format!(
            "index name '{}' must not start with '-', '_' or '+'",
            name
        )));
    }
    if name.chars().any(|c| c.is_uppercase() || FORBIDDEN.contains(&c)) {
        return Err(AppError::Config(format!(
            "index name '{}' must be lowercase without spaces or any of \\ / * ? \" < > | , # :",
            name
        )));
    }
    Ok(())
}
