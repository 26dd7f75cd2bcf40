//! Task DTOs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifies one task of one connector
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId {
    pub connector: String,
    pub task: u32,
}

/// Entry of a connector's task listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInfo {
    pub id: TaskId,

    /// Task configuration generated by the connector
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
}
