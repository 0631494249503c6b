// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration inspection commands

use anyhow::Result;
use clap::Subcommand;
use gp_config_core::{Provenance, Resolved};
use serde_json::Value;

use crate::AppContext;

/// Dotted keys whose values are never printed
const SECRET_KEYS: &[&str] = &["provider.access-token"];

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration values
    Show {
        /// Only show this key or section, e.g. `provider`
        key: Option<String>,
        /// Show which layer set each value
        #[arg(long)]
        show_origin: bool,
    },
    /// Explain where a configuration value comes from
    Explain {
        key: String,
    },
}

impl ConfigCommands {
    pub fn run(self, ctx: &AppContext) -> Result<()> {
        let lines = match self {
            ConfigCommands::Show { key, show_origin } => show_lines(&ctx.resolved, key.as_deref(), show_origin),
            ConfigCommands::Explain { key } => explain_lines(&ctx.resolved, &key),
        };
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }
}

pub fn show_lines(resolved: &Resolved, key: Option<&str>, show_origin: bool) -> Vec<String> {
    let mut lines = Vec::new();
    match key {
        Some(key) => match lookup(&resolved.json, key) {
            Some(value) => flatten(value, key, show_origin, &resolved.provenance, &mut lines),
            None => lines.push(format!("Configuration key '{}' not found", key)),
        },
        None => flatten(&resolved.json, "", show_origin, &resolved.provenance, &mut lines),
    }
    lines.sort();
    lines
}

pub fn explain_lines(resolved: &Resolved, key: &str) -> Vec<String> {
    let Some(scope) = resolved.provenance.winner.get(key) else {
        return vec![format!("Configuration key '{}' not set by any layer", key)];
    };

    let mut lines = vec![format!("Configuration key: {}", key), format!("Winning scope: {}", scope)];
    if let Some(changes) = resolved.provenance.changes.get(key) {
        lines.push("Change history:".to_string());
        for (change_scope, value) in changes {
            lines.push(format!("  {}: {}", change_scope, display_value(key, value)));
        }
    }
    lines
}

fn lookup<'a>(json: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted.split('.').try_fold(json, |current, part| current.get(part))
}

fn flatten(json: &Value, prefix: &str, show_origin: bool, provenance: &Provenance, out: &mut Vec<String>) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(value, &full_key, show_origin, provenance, out);
            }
        }
        _ => {
            let value = display_value(prefix, json);
            match provenance.winner.get(prefix).filter(|_| show_origin) {
                Some(scope) => out.push(format!("{}={} (from {})", prefix, value, scope)),
                None => out.push(format!("{}={}", prefix, value)),
            }
        }
    }
}

fn display_value(key: &str, value: &Value) -> String {
    if SECRET_KEYS.contains(&key) {
        gp_logging::REDACTED.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_config_core::paths::Paths;
    use pretty_assertions::assert_eq;

    fn resolved() -> Resolved {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("user.toml");
        std::fs::write(
            &user,
            "[provider]\norganization-id = \"org-1\"\naccess-token = \"pt-secret\"\n",
        )
        .unwrap();
        let paths = Paths {
            user,
            project: None,
            cli_config: None,
        };
        gp_config_core::load_with_env(&paths, serde_json::json!({}), &[("general.time-range", "14")]).unwrap()
    }

    #[gp_test_utils::logged_test]
    fn show_redacts_the_token_and_reports_origins() {
        let lines = show_lines(&resolved(), None, true);
        assert_eq!(
            lines,
            vec![
                "general.time-range=14 (from flags)".to_string(),
                "provider.access-token=[REDACTED] (from user)".to_string(),
                "provider.organization-id=\"org-1\" (from user)".to_string(),
            ]
        );
    }

    #[gp_test_utils::logged_test]
    fn show_filters_by_section() {
        let lines = show_lines(&resolved(), Some("general"), false);
        assert_eq!(lines, vec!["general.time-range=14".to_string()]);
        let missing = show_lines(&resolved(), Some("reports.format"), false);
        assert_eq!(missing, vec!["Configuration key 'reports.format' not found".to_string()]);
    }

    #[gp_test_utils::logged_test]
    fn explain_lists_changes_without_secrets() {
        let lines = explain_lines(&resolved(), "provider.access-token");
        assert_eq!(lines[1], "Winning scope: user");
        assert!(lines.iter().all(|l| !l.contains("pt-secret")));
    }
}
