//! Error envelope returned by the worker on failed requests

use serde::{Deserialize, Serialize};

/// Body of every non-2xx reply, e.g.
/// `{"error_code": 404, "message": "Connector foo not found"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_code: u16,
    pub message: String,
}

impl ErrorBody {
    pub fn new(error_code: u16, message: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
        }
    }
}
