//! HTTP adapter for the query execution service.
//!
//! Sends each query to `POST {base_url}/connections/{id}/execute` and maps the
//! response onto rows or an [`ExecutionError`].
//!
//! | Response | Outcome |
//! |----------|---------|
//! | 2xx `{"rows": [...]}` | rows |
//! | 400, 422 | [`ExecutionError::Query`] with the service's `detail` |
//! | 408 | [`ExecutionError::Timeout`] |
//! | connect error, timeout, 404, 429, 5xx | [`ExecutionError::Unavailable`] after retries |
//!
//! # Example
//!
//! ```
//! use optimizeql::{compare::HttpExecutor, config::Config};
//!
//! let config = Config::default();
//! let executor = HttpExecutor::new(&config);
//! assert_eq!(
//!     executor.execute_url("conn-1").unwrap().as_str(),
//!     "http://localhost:8000/api/v1/connections/conn-1/execute"
//! );
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::{
    executor::{ExecutionError, QueryExecutor},
    types::Row
};
use crate::{
    config::{Config, RetryConfig},
    error::{error_message, http_error}
};

/// Client for a remote query execution service with retry support.
pub struct HttpExecutor {
    base_url:     String,
    api_key:      Option<String>,
    timeout_ms:   u64,
    client:       reqwest::Client,
    retry_config: RetryConfig
}

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    sql:        &'a str,
    row_limit:  usize,
    timeout_ms: u64
}

#[derive(Deserialize)]
struct ExecuteResponse {
    rows: Vec<Row>
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(alias = "error", alias = "message")]
    detail: String
}

impl HttpExecutor {
    /// Create new executor from configuration
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.executor.request_timeout_ms))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: config.executor.base_url.trim_end_matches('/').to_string(),
            api_key: config.executor.api_key.clone(),
            timeout_ms: config.compare.statement_timeout_ms,
            client,
            retry_config: config.retry.clone()
        }
    }

    /// Execute endpoint for a connection; the id is percent-encoded as a
    /// single path segment.
    pub fn execute_url(&self, connection_id: &str) -> Result<Url, ExecutionError> {
        let invalid = || {
            ExecutionError::Unavailable(format!("invalid executor URL: {}", self.base_url))
        };
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["connections", connection_id, "execute"]);
        Ok(url)
    }

    async fn call_with_retry(
        &self,
        connection_id: &str,
        sql: &str,
        row_limit: usize
    ) -> Result<Vec<Row>, ExecutionError> {
        let mut last_error = None;
        let mut delay = self.retry_config.initial_delay_ms;
        for attempt in 0..=self.retry_config.max_retries {
            if attempt > 0 {
                warn!(
                    attempt = attempt + 1,
                    max_attempts = self.retry_config.max_retries + 1,
                    delay_ms = delay,
                    "retrying execution request"
                );
                sleep(Duration::from_millis(delay)).await;
                delay = ((delay as f64 * self.retry_config.backoff_factor) as u64)
                    .min(self.retry_config.max_delay_ms);
            }
            match self.call_service(connection_id, sql, row_limit).await {
                Ok(rows) => return Ok(rows),
                Err(Attempt::Retryable(e)) => last_error = Some(e),
                Err(Attempt::Final(e)) => return Err(e)
            }
        }
        Err(last_error
            .unwrap_or_else(|| ExecutionError::Unavailable("all retry attempts failed".into())))
    }

    async fn call_service(
        &self,
        connection_id: &str,
        sql: &str,
        row_limit: usize
    ) -> Result<Vec<Row>, Attempt> {
        let request = ExecuteRequest {
            sql,
            row_limit,
            timeout_ms: self.timeout_ms
        };
        let url = self.execute_url(connection_id).map_err(Attempt::Final)?;
        let mut builder = self.client.post(url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("X-API-Key", key);
        }
        let response = builder.send().await.map_err(|e| {
            Attempt::Retryable(ExecutionError::Unavailable(error_message(&http_error(e))))
        })?;

        let status = response.status();
        debug!(connection_id, %status, "execution service responded");
        if status.is_success() {
            let mut result: ExecuteResponse = response.json().await.map_err(|e| {
                Attempt::Final(ExecutionError::Unavailable(format!(
                    "malformed execution response: {}",
                    error_message(&http_error(e))
                )))
            })?;
            result.rows.truncate(row_limit);
            return Ok(result.rows);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.detail)
            .unwrap_or(text);
        Err(classify_status(status, detail, self.timeout_ms))
    }
}

enum Attempt {
    Retryable(ExecutionError),
    Final(ExecutionError)
}

fn classify_status(status: StatusCode, detail: String, timeout_ms: u64) -> Attempt {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Attempt::Final(ExecutionError::Query(detail.trim().to_string()))
        }
        StatusCode::REQUEST_TIMEOUT => Attempt::Final(ExecutionError::Timeout(timeout_ms)),
        StatusCode::TOO_MANY_REQUESTS => Attempt::Retryable(ExecutionError::Unavailable(
            format!("HTTP {}: {}", status, detail)
        )),
        s if s.is_server_error() => Attempt::Retryable(ExecutionError::Unavailable(format!(
            "HTTP {}: {}",
            status, detail
        ))),
        _ => Attempt::Final(ExecutionError::Unavailable(format!(
            "HTTP {}: {}",
            status, detail
        )))
    }
}

#[async_trait]
impl QueryExecutor for HttpExecutor {
    async fn execute_query(
        &self,
        connection_id: &str,
        sql: &str,
        row_limit: usize
    ) -> Result<Vec<Row>, ExecutionError> {
        self.call_with_retry(connection_id, sql, row_limit).await
    }
}
