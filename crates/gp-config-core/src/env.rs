// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Environment and command-line overlays

use anyhow::Result;
use serde_json::{Map, Value as J};

pub const ENV_PREFIX: &str = "GITPULSE";

/// Overlay from `GITPULSE_*` variables.
///
/// Sections and keys are separated by a double underscore and single
/// underscores become dashes: `GITPULSE_PROVIDER__ACCESS_TOKEN` sets
/// `provider.access-token`.
pub fn env_overlay() -> Result<J> {
    env_overlay_from(None)
}

/// Same as [`env_overlay`], reading from `vars` instead of the process environment
pub fn env_overlay_from(vars: Option<config::Map<String, String>>) -> Result<J> {
    let built = config::Config::builder()
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        )
        .build()?;

    let map = built.try_deserialize::<Map<String, J>>()?;
    let mut json = J::Object(map);
    // GITPULSE_HOME locates the user config file and is not a config key
    if let J::Object(root) = &mut json {
        root.remove("home");
    }
    Ok(kebab_keys(json))
}

fn kebab_keys(v: J) -> J {
    match v {
        J::Object(map) => J::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase().replace('_', "-"), kebab_keys(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Overlay from `--set key=value` pairs.
///
/// Values that parse as JSON (numbers, booleans, arrays) keep their type;
/// anything else is taken as a string.
pub fn flags_overlay(kv_pairs: &[(&str, &str)]) -> J {
    let mut root = serde_json::json!({});
    for (k, v) in kv_pairs {
        crate::merge::insert_dotted(&mut root, k, parse_flag_value(v));
    }
    root
}

fn parse_flag_value(raw: &str) -> J {
    match serde_json::from_str::<J>(raw) {
        Ok(J::String(_)) | Err(_) => J::String(raw.to_string()),
        Ok(value) => value,
    }
}

/// Split a `key=value` flag
pub fn parse_set_flag(flag: &str) -> Result<(String, String)> {
    let (key, value) = flag
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected key=value, got '{}'", flag))?;
    let key = key.trim();
    if key.is_empty() || key.split('.').any(str::is_empty) {
        anyhow::bail!("invalid config key in '{}'", flag);
    }
    Ok((key.to_string(), value.to_string()))
}
