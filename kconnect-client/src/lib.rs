//! kconnect HTTP Client
//!
//! A typed client for the connector management REST API of a Kafka Connect
//! style worker cluster.
//!
//! Every call returns `Result<ApiResponse<T>>`: on success the decoded body
//! together with the HTTP status, on failure a `ClientError` that keeps
//! transport failures apart from error statuses reported by the worker.
//!
//! # Example
//!
//! ```no_run
//! use kconnect_client::ConnectClient;
//! use kconnect_core::{ConnectorConfig, ConnectorRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ConnectClient::new("localhost:8083")?;
//!
//!     let mut config = ConnectorConfig::new();
//!     config.insert(
//!         "connector.class".to_string(),
//!         "FileStreamSinkConnector".into(),
//!     );
//!     config.insert("topics".to_string(), "users".into());
//!
//!     let created = client
//!         .create_connector(&ConnectorRequest::new("users-sink", config))
//!         .await?;
//!
//!     println!("Created connector {} ({})", created.name, created.status);
//!     Ok(())
//! }
//! ```

mod api;
pub mod config;
mod connectors;
pub mod error;
mod plugins;
mod request;
mod response;
mod tasks;

pub use api::ConnectApi;
pub use config::{ClientConfig, LogVerbosity, RetryPolicy};
pub use error::{ApiError, ClientError, Result};
pub use response::ApiResponse;

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, error, trace, warn};

use request::{ApiRequest, endpoint_url, parse_base_url};

/// HTTP client for the connector management API
///
/// Methods are organized into groups:
/// - Connector management (create, list, get, config, status, delete)
/// - Connector lifecycle (restart, pause, resume)
/// - Tasks (list, status, restart)
/// - Plugins (list, validate config)
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ConnectClient {
    /// Parsed base URL endpoints are appended to
    base_url: Url,
    /// Configuration the client was built from
    config: Arc<ClientConfig>,
    /// HTTP client instance
    client: Client,
}

impl ConnectClient {
    /// Create a client for a worker listening on `address` (host:port)
    ///
    /// # Example
    /// ```
    /// use kconnect_client::ConnectClient;
    ///
    /// let client = ConnectClient::new("localhost:8083").unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8083");
    /// ```
    pub fn new(address: impl AsRef<str>) -> Result<Self> {
        Self::with_config(ClientConfig::new(address))
    }

    /// Create a client from an explicit configuration
    ///
    /// # Example
    /// ```
    /// use kconnect_client::{ClientConfig, ConnectClient, LogVerbosity};
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new("localhost:8083")
    ///     .with_timeout(Duration::from_secs(30))
    ///     .with_log_verbosity(LogVerbosity::Verbose);
    ///
    /// let client = ConnectClient::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = build_http_client(&config)?;
        Self::with_client(config, client)
    }

    /// Create a client with a custom HTTP client
    ///
    /// Timeouts and headers from `config` are not applied to `client`; only the
    /// base URL, retry rule and logging settings are used.
    pub fn with_client(config: ClientConfig, client: Client) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        Ok(Self {
            base_url,
            config: Arc::new(config),
            client,
        })
    }

    /// Get the base URL of the worker
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        endpoint_url(&self.base_url, segments)
    }

    // =============================================================================
    // Request Execution
    // =============================================================================

    /// Send a request and decode its JSON body
    async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<ApiResponse<T>> {
        let span = self.config.span.clone();
        async {
            let response = self.send_with_retry(&request).await?;
            self.handle_response(request.operation, response).await
        }
        .instrument(span)
        .await
    }

    /// Send a request whose reply carries no body of interest
    async fn execute_empty(&self, request: ApiRequest) -> Result<ApiResponse<()>> {
        let span = self.config.span.clone();
        async {
            let response = self.send_with_retry(&request).await?;
            self.handle_empty_response(request.operation, response).await
        }
        .instrument(span)
        .await
    }

    /// Send a request, repeating it while the status is in the retry set
    ///
    /// Transport failures end the call immediately.
    async fn send_with_retry(&self, request: &ApiRequest) -> Result<reqwest::Response> {
        let retry = &self.config.retry;
        let verbosity = self.config.log_verbosity;
        let mut attempt = 0;

        loop {
            attempt += 1;

            let mut builder = self
                .client
                .request(request.method.clone(), request.url.clone());
            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }

            if verbosity.is_enabled() {
                debug!(
                    operation = request.operation,
                    method = %request.method,
                    url = %request.url,
                    attempt = attempt,
                    "Sending request"
                );
            }
            if verbosity.log_headers() {
                let names: Vec<&str> = self.config.headers.iter().map(|(n, _)| n.as_str()).collect();
                debug!(operation = request.operation, headers = ?names, "Request headers");
            }
            if verbosity.log_bodies() {
                if let Some(body) = &request.body {
                    trace!(body = %String::from_utf8_lossy(body), "Request body");
                }
            }

            let response = match builder.send().await {
                Ok(response) => response,
                Err(e) => {
                    if verbosity.is_enabled() {
                        error!(
                            operation = request.operation,
                            url = %request.url,
                            error = %e,
                            "Request failed"
                        );
                    }
                    return Err(ClientError::Transport(e));
                }
            };

            let status = response.status().as_u16();
            if verbosity.is_enabled() {
                debug!(
                    operation = request.operation,
                    url = %request.url,
                    status = status,
                    attempt = attempt,
                    "Received response"
                );
            }

            if retry.should_retry(status, attempt) {
                if verbosity.is_enabled() {
                    warn!(
                        operation = request.operation,
                        url = %request.url,
                        status = status,
                        attempt = attempt,
                        wait_ms = retry.wait.as_millis() as u64,
                        "Retryable status, retrying"
                    );
                }
                tokio::time::sleep(retry.wait).await;
                continue;
            }

            return Ok(response);
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// A status of 400 or above becomes `ClientError::Api` carrying the raw
    /// body. An empty body decodes as JSON `null`.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>> {
        let status = response.status().as_u16();
        let body = self.read_body(operation, status, response).await?;

        let text = if body.trim().is_empty() {
            "null"
        } else {
            body.as_str()
        };

        match serde_json::from_str(text) {
            Ok(data) => Ok(ApiResponse { status, data }),
            Err(e) => Err(ClientError::Decode {
                status,
                message: e.to_string(),
                body,
            }),
        }
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(
        &self,
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<ApiResponse<()>> {
        let status = response.status().as_u16();
        self.read_body(operation, status, response).await?;
        Ok(ApiResponse { status, data: () })
    }

    /// Read the body and turn error statuses into `ClientError::Api`
    async fn read_body(
        &self,
        operation: &'static str,
        status: u16,
        response: reqwest::Response,
    ) -> Result<String> {
        let verbosity = self.config.log_verbosity;
        let body = response.text().await?;

        if verbosity.log_bodies() {
            trace!(operation = operation, status = status, body = %body, "Response body");
        }

        if status >= 400 {
            if verbosity.is_enabled() {
                error!(operation = operation, status = status, "Worker returned an error status");
            }
            return Err(ApiError::from_response(status, body).into());
        }

        Ok(body)
    }
}

/// Build the pooled HTTP client with JSON headers and the configured timeouts
fn build_http_client(config: &ClientConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (name, value) in &config.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::InvalidConfig(format!("Invalid header name {name}: {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::InvalidConfig(format!("Invalid value for header {name}: {e}")))?;
        headers.insert(header_name, header_value);
    }

    Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .tcp_keepalive(config.tcp_keepalive)
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .build()
        .map_err(|e| ClientError::InvalidConfig(format!("Failed to build HTTP client: {e}")))
}
