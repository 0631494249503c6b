// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! TOML loading and JSON validation

use anyhow::{Context, Result};
use serde_json::Value as J;
use std::path::Path;
use std::sync::OnceLock;

/// Parse a TOML document into JSON
pub fn parse_toml_to_json(toml_str: &str) -> Result<J> {
    let toml: toml::Value = toml_str.parse::<toml::Value>()?;
    serde_json::to_value(toml).context("converting TOML to JSON")
}

fn schema() -> &'static J {
    static SCHEMA: OnceLock<J> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let root = schemars::schema_for!(crate::schema::SchemaRoot);
        serde_json::to_value(root).unwrap_or(J::Bool(true))
    })
}

/// Validate JSON against the configuration schema
pub fn validate_against_schema(v: &J) -> Result<()> {
    use jsonschema::{Draft, JSONSchema};

    static VALIDATOR: OnceLock<Result<JSONSchema, String>> = OnceLock::new();
    let validator = VALIDATOR
        .get_or_init(|| {
            JSONSchema::options()
                .with_draft(Draft::Draft202012)
                .compile(schema())
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|e| anyhow::anyhow!("config schema does not compile: {}", e))?;

    if let Err(errors) = validator.validate(v) {
        let error_msg = errors
            .map(|e| format!("{} (at '{}')", e, e.instance_path))
            .collect::<Vec<_>>()
            .join("\n  - ");
        anyhow::bail!("config schema validation failed:\n  - {}", error_msg);
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub scope: crate::Scope,
    pub json: J,
}

/// Load and validate a layer from a TOML file
pub fn read_layer_from_file(path: &Path, scope: crate::Scope) -> Result<Layer> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;

    let json = parse_toml_to_json(&content)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    validate_against_schema(&json).with_context(|| format!("in {}", path.display()))?;

    tracing::debug!(path = %path.display(), ?scope, "loaded config layer");
    Ok(Layer { scope, json })
}

/// Like [`read_layer_from_file`], but a missing file is `Ok(None)`
pub fn read_optional_layer(path: &Path, scope: crate::Scope) -> Result<Option<Layer>> {
    if !path.exists() {
        return Ok(None);
    }
    read_layer_from_file(path, scope).map(Some)
}
