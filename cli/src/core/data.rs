//! # Role Data Sources
//!
//! File: cli/src/core/data.rs
//!
//! ## Overview
//!
//! The renderer consumes the documentation data of one role as a ready-made
//! mapping. This module defines the `DataSource` seam the pipeline reads it
//! through, and `YamlDataFile`, which loads a pre-assembled YAML (or JSON)
//! document from disk.
//!
//! Values use `serde_json::Value`, the tagged null/bool/number/string/array/object
//! variant that is handed to minijinja as the render context.
//!
use crate::core::error::{Result, RoledocError};
use anyhow::{anyhow, Context};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies the fully assembled documentation data for one role.
pub trait DataSource {
    fn get_data(&self) -> Result<Map<String, Value>>;
}

/// Role data stored in a YAML or JSON file whose root is a mapping.
#[derive(Debug, Clone)]
pub struct YamlDataFile {
    path: PathBuf,
}

impl YamlDataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for YamlDataFile {
    fn get_data(&self) -> Result<Map<String, Value>> {
        debug!("Loading role data from: {}", self.path.display());
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read role data file '{}'", self.path.display()))?;
        parse_role_data(&content).with_context(|| {
            format!("Invalid role data in file '{}'", self.path.display())
        })
    }
}

/// Parses a YAML document into a mapping. An empty document yields an empty mapping.
pub fn parse_role_data(content: &str) -> Result<Map<String, Value>> {
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_yaml::from_str(content)
        .map_err(|e| anyhow!(RoledocError::DataSource(e.to_string())))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(anyhow!(RoledocError::DataSource(format!(
            "Expected a mapping at the document root, found {}",
            value_kind(&other)
        )))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_parse_nested_mapping() -> Result<()> {
        let data = parse_role_data(
            "name: demo\nvar:\n  http_port:\n    value: 8080\n    description: Listen port\ntags: [web, db]\n",
        )?;
        assert_eq!(data["name"], json!("demo"));
        assert_eq!(data["var"]["http_port"]["value"], json!(8080));
        assert_eq!(data["tags"], json!(["web", "db"]));
        Ok(())
    }

    #[test]
    fn test_parse_empty_document() -> Result<()> {
        assert!(parse_role_data("")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_rejects_non_mapping_root() {
        let err = parse_role_data("- a\n- b\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RoledocError>(),
            Some(RoledocError::DataSource(msg)) if msg.contains("a sequence")
        ));
    }

    #[test]
    fn test_yaml_data_file_missing() {
        let dir = tempdir().unwrap();
        let source = YamlDataFile::new(dir.path().join("nope.yml"));
        let err = source.get_data().unwrap_err();
        assert!(err.to_string().contains("nope.yml"));
    }

    #[test]
    fn test_yaml_data_file_reads_json() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("role.json");
        fs::write(&path, r#"{"name": "demo", "meta": {"author": "ops"}}"#)?;
        let data = YamlDataFile::new(&path).get_data()?;
        assert_eq!(data["meta"]["author"], json!("ops"));
        Ok(())
    }
}
