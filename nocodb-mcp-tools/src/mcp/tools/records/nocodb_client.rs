//! NocoDB v2 REST API client implementation
//!
//! This module provides a thin client for the NocoDB table records endpoint.
//! It performs a single GET per call with no retries: a failed attempt is
//! surfaced directly to the caller.
//!
//! The upstream API has been observed to change the name of the record array
//! field across versions (`list` vs `rows`), so record extraction is a small
//! ordered list of strategies tried in sequence; first match wins.

use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Environment variable consulted once at startup for the fallback API token.
pub const NOCODB_TOKEN_ENV: &str = "NOCODB_TOKEN";

/// Production NocoDB base address.
const DEFAULT_BASE_URL: &str = "https://app.nocodb.com";

/// Identifier of the table this adapter serves.
const DEFAULT_TABLE_ID: &str = "mg0cr0r3zyirzd8";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default truncation bound for per-record log lines. Log hygiene only, not
/// part of the response contract.
const DEFAULT_LOG_RECORD_MAX_LEN: usize = 200;

/// Configuration for the NocoDB API client
///
/// Resolved once at startup and injected into the tool context, so the
/// environment is never consulted again per call. The per-call `token`
/// parameter always takes precedence over [`NocoDbConfig::api_token`].
#[derive(Debug, Clone)]
pub struct NocoDbConfig {
    /// Base address of the NocoDB deployment
    pub base_url: String,
    /// Table identifier the records endpoint is built from
    pub table_id: String,
    /// Fallback API token, normally sourced from `NOCODB_TOKEN`
    pub api_token: Option<String>,
    /// Request timeout duration
    pub timeout: Duration,
    /// Maximum characters of a serialized record written per log line
    pub log_record_max_len: usize,
}

impl Default for NocoDbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            table_id: DEFAULT_TABLE_ID.to_string(),
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
            log_record_max_len: DEFAULT_LOG_RECORD_MAX_LEN,
        }
    }
}

impl NocoDbConfig {
    /// Creates the default configuration with the API token read from the
    /// `NOCODB_TOKEN` environment variable.
    pub fn from_env() -> Self {
        Self {
            api_token: std::env::var(NOCODB_TOKEN_ENV).ok(),
            ..Self::default()
        }
    }
}

/// Validated query parameters for a records fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordsQuery {
    /// Maximum number of records to return (1-1000)
    pub limit: u32,
    /// Number of records to skip
    pub offset: u32,
    /// 1 to return records in random order, 0 otherwise
    pub shuffle: u8,
}

impl Default for RecordsQuery {
    fn default() -> Self {
        Self {
            limit: 25,
            offset: 0,
            shuffle: 0,
        }
    }
}

/// Result envelope returned to the caller on success
///
/// Invariant: `count` always equals `records.len()`.
#[derive(Debug, Clone, Serialize)]
pub struct RecordsPage {
    /// Number of records in this page
    pub count: usize,
    /// The records themselves, passed through verbatim from the API
    pub records: Vec<Value>,
}

/// Errors that can occur during NocoDB API operations
#[derive(Debug, thiserror::Error)]
pub enum NocoDbError {
    /// The service answered with a non-success status. The raw body is kept
    /// for logging but is never forwarded to the caller.
    #[error("Request failed: {} {}", status.as_u16(), status.canonical_reason().unwrap_or("Unknown"))]
    Failed {
        /// HTTP status of the failed response
        status: StatusCode,
        /// Raw response body, logged for diagnosis
        body: String,
    },
    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configured base address could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A strategy extracting the record array from a parsed response body.
type RecordExtractor = fn(&Value) -> Option<Vec<Value>>;

/// Field names the API has used for the record array, tried in order.
/// Adding tolerance for another shape is a one-line change here.
const RECORD_EXTRACTORS: &[RecordExtractor] = &[extract_list_field, extract_rows_field];

fn extract_list_field(body: &Value) -> Option<Vec<Value>> {
    body.get("list")?.as_array().cloned()
}

fn extract_rows_field(body: &Value) -> Option<Vec<Value>> {
    body.get("rows")?.as_array().cloned()
}

/// Extracts the record sequence from a parsed response body.
///
/// Returns an empty sequence when no recognized field holds an array.
pub fn extract_records(body: &Value) -> Vec<Value> {
    RECORD_EXTRACTORS
        .iter()
        .find_map(|extract| extract(body))
        .unwrap_or_default()
}

/// NocoDB table records client
#[derive(Debug, Clone)]
pub struct NocoDbClient {
    client: Client,
    config: NocoDbConfig,
}

impl NocoDbClient {
    /// Creates a new client with the specified configuration.
    pub fn new(config: NocoDbConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &NocoDbConfig {
        &self.config
    }

    /// Fetches one page of records from the configured table.
    ///
    /// Performs a single GET with `accept: application/json` and the token in
    /// the `xc-token` header. The body is read in full before the status is
    /// inspected so failed responses can be logged too.
    pub async fn fetch_records(
        &self,
        query: &RecordsQuery,
        token: &str,
    ) -> Result<RecordsPage, NocoDbError> {
        let url = self.build_records_url(query)?;
        tracing::debug!("Fetching records: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("xc-token", token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                "NocoDB request failed: {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body
            );
            return Err(NocoDbError::Failed { status, body });
        }

        let parsed: Value = serde_json::from_str(&body)?;
        let records = extract_records(&parsed);

        Ok(RecordsPage {
            count: records.len(),
            records,
        })
    }

    /// Builds the records endpoint URL with query parameters in the fixed
    /// order `limit`, `offset`, `shuffle`.
    pub fn build_records_url(&self, query: &RecordsQuery) -> Result<String, NocoDbError> {
        let mut url = Url::parse(&self.config.base_url)?;
        url.set_path(&format!("/api/v2/tables/{}/records", self.config.table_id));

        {
            let mut query_pairs = url.query_pairs_mut();
            query_pairs.append_pair("limit", &query.limit.to_string());
            query_pairs.append_pair("offset", &query.offset.to_string());
            query_pairs.append_pair("shuffle", &query.shuffle.to_string());
        }

        Ok(url.to_string())
    }
}
