//! Client configuration
//!
//! Defines everything a `ConnectClient` can be tuned with: the worker address,
//! transport timeouts, the status-based retry rule, extra headers and the
//! caller's logging preferences.

use std::time::Duration;

use tracing::Span;

use crate::error::{ClientError, Result};

/// Client configuration
///
/// The defaults match what a Connect worker expects from a management client.
/// Override individual settings with the `with_*` builders.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the worker REST API (e.g., "http://localhost:8083")
    pub base_url: String,

    /// Overall deadline for a single HTTP exchange
    pub timeout: Duration,

    /// Deadline for establishing the TCP connection
    pub connect_timeout: Duration,

    /// TCP keep-alive interval for pooled connections
    pub tcp_keepalive: Duration,

    /// How long an idle pooled connection is kept open
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: usize,

    /// Status-based retry rule
    pub retry: RetryPolicy,

    /// Headers added to every request, on top of the JSON content headers
    pub headers: Vec<(String, String)>,

    /// How much of each exchange is logged
    pub log_verbosity: LogVerbosity,

    /// Span every call is instrumented with
    pub span: Span,
}

impl ClientConfig {
    /// Configuration for a worker listening on `address` (host:port), spoken to over plain HTTP
    pub fn new(address: impl AsRef<str>) -> Self {
        Self::from_base_url(format!("http://{}", address.as_ref()))
    }

    /// Configuration for a worker reachable at a full base URL
    pub fn from_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(30),
            tcp_keepalive: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 100,
            retry: RetryPolicy::default(),
            headers: Vec::new(),
            log_verbosity: LogVerbosity::default(),
            span: Span::none(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - CONNECT_URL or CONNECT_ADDRESS (one required; URL wins)
    /// - CONNECT_TIMEOUT_SECS (optional, default: 10; 0 or non-numeric keeps the default)
    /// - CONNECT_RETRY_ATTEMPTS (optional, default: 5; clamped to at least 1)
    pub fn from_env() -> Result<Self> {
        let mut config = match (
            std::env::var("CONNECT_URL").ok(),
            std::env::var("CONNECT_ADDRESS").ok(),
        ) {
            (Some(url), _) => Self::from_base_url(url),
            (None, Some(address)) => Self::new(address),
            (None, None) => {
                return Err(ClientError::InvalidConfig(
                    "CONNECT_URL or CONNECT_ADDRESS environment variable not set".to_string(),
                ));
            }
        };

        if let Some(timeout) = std::env::var("CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            config.timeout = Duration::from_secs(timeout);
        }

        if let Some(attempts) = std::env::var("CONNECT_RETRY_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        {
            config.retry.max_attempts = attempts.max(1);
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Send every request exactly once
    pub fn without_retry(mut self) -> Self {
        self.retry = RetryPolicy::disabled();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_log_verbosity(mut self, verbosity: LogVerbosity) -> Self {
        self.log_verbosity = verbosity;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Retry rule applied to completed responses
///
/// Only statuses in `statuses` are retried. Transport failures are never
/// retried. By default a 404 is retried to ride out the window in which a
/// freshly created or reassigned connector is not yet visible on every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Statuses that trigger another attempt
    pub statuses: Vec<u16>,

    /// Fixed pause between attempts
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            statuses: vec![404],
            wait: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            statuses: Vec::new(),
            wait: Duration::ZERO,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Whether a response with `status`, received on attempt number `attempt`
    /// (1-based), should be followed by another attempt
    pub fn should_retry(&self, status: u16, attempt: u32) -> bool {
        attempt < self.max_attempts && self.statuses.contains(&status)
    }
}

/// Verbosity of request/response logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogVerbosity {
    /// No request/response logging.
    Quiet,
    /// Log method, URL, status and attempt (default).
    #[default]
    Normal,
    /// Also log the names of extra request headers.
    Verbose,
    /// Also log request and response bodies.
    Debug,
}

impl LogVerbosity {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, LogVerbosity::Quiet)
    }

    pub fn log_headers(&self) -> bool {
        matches!(self, LogVerbosity::Verbose | LogVerbosity::Debug)
    }

    pub fn log_bodies(&self) -> bool {
        matches!(self, LogVerbosity::Debug)
    }
}
