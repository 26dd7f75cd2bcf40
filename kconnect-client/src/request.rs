//! Outgoing requests as plain data
//!
//! Endpoint methods describe a call as an `ApiRequest`; the client owns
//! sending it, so the same request can be replayed on every retry attempt.

use reqwest::{Method, Url};
use serde::Serialize;

use crate::error::{ClientError, Result};

/// A request to the worker, ready to be sent any number of times
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    /// Human-readable operation name used in logs
    pub operation: &'static str,
    pub method: Method,
    pub url: Url,
    /// Encoded JSON body
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new(operation: &'static str, method: Method, url: Url) -> Self {
        Self {
            operation,
            method,
            url,
            body: None,
        }
    }

    pub fn get(operation: &'static str, url: Url) -> Self {
        Self::new(operation, Method::GET, url)
    }

    pub fn post(operation: &'static str, url: Url) -> Self {
        Self::new(operation, Method::POST, url)
    }

    pub fn put(operation: &'static str, url: Url) -> Self {
        Self::new(operation, Method::PUT, url)
    }

    pub fn delete(operation: &'static str, url: Url) -> Self {
        Self::new(operation, Method::DELETE, url)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }
}

/// Parse and check a worker base URL
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| ClientError::InvalidConfig(format!("Invalid base URL {base_url}: {e}")))?;

    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidConfig(format!(
            "Base URL {base_url} cannot carry a path"
        )));
    }

    Ok(url)
}

/// Append path segments to the base URL, percent-encoding each one
///
/// An empty last segment yields a trailing slash.
pub(crate) fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidConfig(format!("Base URL {base} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
