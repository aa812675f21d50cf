//! Search datastore client
//!
//! Thin HTTP client over an Elasticsearch-compatible REST API. Constructed
//! once per run from [`Config`] and closed explicitly when the command ends.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Error types the datastore uses for "index already exists"
const ALREADY_EXISTS_TYPES: &[&str] = &[
    "resource_already_exists_exception",
    "index_already_exists_exception",
];

/// Root endpoint response (`GET /`)
#[derive(Debug, Deserialize)]
pub struct ClusterInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cluster_name: String,
    pub version: ClusterVersion,
}

#[derive(Debug, Deserialize)]
pub struct ClusterVersion {
    pub number: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
}

/// Outcome of an index-creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateIndexOutcome {
    Created,
    AlreadyExists,
}

pub struct SearchClient {
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    http_client: reqwest::Client,
}

impl SearchClient {
    /// Create new client
    pub fn new(config: &Config) -> AppResult<Self> {
        reqwest::Url::parse(&config.es_url)
            .map_err(|e| AppError::Config(format!("invalid ES_URL '{}': {}", config.es_url, e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.es_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self.http_client.request(method, url);
        match &self.username {
            Some(user) => builder.basic_auth(user, self.password.as_ref()),
            None => builder,
        }
    }

    /// Check the datastore is reachable
    pub async fn ping(&self) -> AppResult<ClusterInfo> {
        let url = format!("{}/", self.base_url);

        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|e| AppError::Network { url: url.clone(), message: e.to_string() })?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|e| AppError::Parse(e.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::Rejected { url, status: status.as_u16(), body })
        }
    }

    /// `PUT /<index>` with a mapping body; "already exists" is not an error
    pub async fn create_index(&self, index: &str, body: &Value) -> AppResult<CreateIndexOutcome> {
        let url = format!("{}/{}", self.base_url, index);

        tracing::debug!("Creating index {} at {}", index, self.base_url);

        let response = self
            .request(reqwest::Method::PUT, &url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Network { url: url.clone(), message: e.to_string() })?;

        let status = response.status();
        if status.is_success() {
            return Ok(CreateIndexOutcome::Created);
        }

        let text = response.text().await.unwrap_or_default();
        if is_already_exists(status.as_u16(), &text) {
            return Ok(CreateIndexOutcome::AlreadyExists);
        }

        tracing::error!("Index creation failed ({}): {}", status.as_u16(), text);
        Err(AppError::Rejected { url, status: status.as_u16(), body: text })
    }

    /// Release the connection pool
    pub fn close(self) {
        tracing::debug!("Closing datastore client for {}", self.base_url);
        drop(self.http_client);
    }
}

/// 400 with an already-exists error type, as the create-index API reports it
fn is_already_exists(status: u16, body: &str) -> bool {
    if status != 400 {
        return false;
    }
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| ALREADY_EXISTS_TYPES.contains(&b.error.kind.as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_detection() {
        let body = r#"{"error":{"root_cause":[],"type":"resource_already_exists_exception","reason":"index [network-logs/abc] already exists"},"status":400}"#;
        assert!(is_already_exists(400, body));
        assert!(!is_already_exists(409, body));

        let other = r#"{"error":{"type":"mapper_parsing_exception","reason":"bad"},"status":400}"#;
        assert!(!is_already_exists(400, other));
        assert!(!is_already_exists(400, "not json"));
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let config = Config {
            es_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(SearchClient::new(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = Config {
            es_url: "http://localhost:9200/".to_string(),
            ..Config::default()
        };
        let client = SearchClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9200");
        client.close();
    }
}
