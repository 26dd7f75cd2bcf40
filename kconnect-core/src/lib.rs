//! kconnect Core
//!
//! Wire types for the connector management REST API.
//!
//! This crate contains:
//! - DTOs: request and response bodies exchanged with a Connect worker
//!   (connectors, task status, plugins, config validation, error envelope)
//!
//! It is shared by the HTTP client and the in-memory worker so both sides
//! agree on the JSON shapes.

pub mod dto;

pub use dto::connector::{ConnectorConfig, ConnectorInfo, ConnectorRequest, ConnectorType};
pub use dto::error::ErrorBody;
pub use dto::plugin::{ConfigDefinition, ConfigInfo, ConfigValidation, ConfigValue, PluginInfo};
pub use dto::status::{ConnectorStatus, State, TaskStatus, WorkerStatus};
pub use dto::task::{TaskId, TaskInfo};
