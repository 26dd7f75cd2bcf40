//! Data Transfer Objects for the connector management API
//!
//! These mirror the JSON bodies a Connect worker sends and accepts. Fields the
//! worker may omit are defaulted, and fields we do not model are ignored, so
//! newer workers keep decoding.

pub mod connector;
pub mod error;
pub mod plugin;
pub mod status;
pub mod task;
