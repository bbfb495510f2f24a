//! YAML processing utilities

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize data structure to a YAML string.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    serde_yaml::to_string(data).context("Failed to serialize to YAML")
}
