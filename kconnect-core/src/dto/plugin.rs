//! Connector plugin DTOs

use serde::{Deserialize, Serialize};

/// Connector plugin installed on a worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Fully qualified connector class
    pub class: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub plugin_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Outcome of validating a configuration against a plugin's definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigValidation {
    /// Plugin class the configuration was validated against
    pub name: String,

    /// Number of fields with at least one error
    pub error_count: u32,

    /// Configuration groups, in display order
    #[serde(default)]
    pub groups: Vec<String>,

    #[serde(default)]
    pub configs: Vec<ConfigInfo>,
}

impl ConfigValidation {
    pub fn is_valid(&self) -> bool {
        self.error_count == 0
    }

    /// Fields that failed validation, with their error messages
    pub fn field_errors(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.configs
            .iter()
            .filter(|c| !c.value.errors.is_empty())
            .map(|c| (c.value.name.as_str(), c.value.errors.as_slice()))
    }
}

/// Definition and submitted value of one configuration field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub definition: ConfigDefinition,
    pub value: ConfigValue,
}

/// Static description of a configuration field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub required: bool,
    pub default_value: Option<String>,
    pub importance: String,
    pub documentation: String,
    pub group: Option<String>,
    pub width: String,
    pub display_name: String,
    pub dependents: Vec<String>,
    pub order: i32,
}

/// Submitted value of a configuration field and what the plugin thinks of it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigValue {
    pub name: String,
    pub value: Option<String>,
    pub recommended_values: Vec<String>,
    pub errors: Vec<String>,
    pub visible: bool,
}
