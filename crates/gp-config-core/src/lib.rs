// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Layered configuration for gitpulse.
//!
//! Every layer is converted to `serde_json::Value`, validated against the
//! schema generated from [`SchemaRoot`], and deep-merged in precedence order:
//!
//! user file < project file < environment < `--config` file < `--set` flags
//!
//! Typed sections are pulled out of the merged JSON with [`extract::get_at`].

pub mod env;
pub mod extract;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod provenance;
pub mod schema;

pub use provenance::{Provenance, Scope};
pub use schema::SchemaRoot;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value as J;

/// Merged configuration together with where each value came from
#[derive(Debug, Clone)]
pub struct Resolved {
    pub json: J,
    pub provenance: Provenance,
}

impl Resolved {
    /// Typed view of a top-level section; a missing section yields its default
    pub fn section<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.json.get(key) {
            None | Some(J::Null) => Ok(T::default()),
            Some(_) => extract::get_at(&self.json, key),
        }
    }
}

/// Load and merge all configuration layers.
///
/// Missing files are skipped. A file that exists but fails to parse or
/// validate is an error, as is a merged result that violates the schema.
pub fn load_all(paths: &paths::Paths, flag_sets: &[(&str, &str)]) -> Result<Resolved> {
    let env_layer = env::env_overlay()?;
    load_with_env(paths, env_layer, flag_sets)
}

/// Same as [`load_all`] with an explicit environment overlay
pub fn load_with_env(paths: &paths::Paths, env_layer: J, flag_sets: &[(&str, &str)]) -> Result<Resolved> {
    use Scope::*;

    let mut layers: Vec<loader::Layer> = Vec::new();
    if let Some(layer) = loader::read_optional_layer(&paths.user, User)? {
        layers.push(layer);
    }
    if let Some(project) = &paths.project {
        if let Some(layer) = loader::read_optional_layer(project, Project)? {
            layers.push(layer);
        }
    }
    layers.push(loader::Layer {
        scope: Env,
        json: env_layer,
    });
    if let Some(cli_config) = &paths.cli_config {
        // an explicitly named file must exist
        layers.push(loader::read_layer_from_file(cli_config, CliConfig)?);
    }
    layers.push(loader::Layer {
        scope: Flags,
        json: env::flags_overlay(flag_sets),
    });

    let mut json = serde_json::json!({});
    let mut prov = Provenance::default();
    for layer in layers {
        provenance::record_layer(&layer.json, layer.scope, &mut prov, "");
        merge::merge_two_json(&mut json, layer.json);
    }

    loader::validate_against_schema(&json)?;
    tracing::debug!(keys = prov.winner.len(), "configuration resolved");

    Ok(Resolved {
        json,
        provenance: prov,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_config_types::{GeneralConfig, OrderPolicy, ProviderConfig, TeamSection};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[gp_test_utils::logged_test]
    fn layers_merge_in_precedence_order() {
        let dir = TempDir::new().unwrap();
        let user = write(
            &dir,
            "user.toml",
            r#"
            [general]
            time-range = 14
            output-dir = "/tmp/user-reports"
            [provider]
            organization-id = "user-org"
            access-token = "user-token"
            "#,
        );
        let project = write(
            &dir,
            "gitpulse.toml",
            r#"
            [general]
            project-name = "pulse"
            [provider]
            organization-id = "project-org"
            [[team.members]]
            username = "zhangsan"
            name = "Zhang San"
            email = "zhangsan@example.com"
            "#,
        );
        let paths = paths::Paths {
            user,
            project: Some(project),
            cli_config: None,
        };
        let env = serde_json::json!({"provider": {"order-policy": "full-scan"}});

        let resolved = load_with_env(&paths, env, &[("general.time-range", "3")]).unwrap();

        let general: GeneralConfig = resolved.section("general").unwrap();
        assert_eq!(general.time_range_days(), 3);
        assert_eq!(general.output_dir(), "/tmp/user-reports");
        assert_eq!(general.project_name(), "pulse");

        let provider: ProviderConfig = resolved.section("provider").unwrap();
        assert_eq!(provider.organization_id.as_deref(), Some("project-org"));
        assert_eq!(provider.access_token.as_deref(), Some("user-token"));
        assert_eq!(provider.order_policy(), OrderPolicy::FullScan);

        let team: TeamSection = resolved.section("team").unwrap();
        assert_eq!(team.members.len(), 1);

        let winner = &resolved.provenance.winner;
        assert_eq!(winner.get("general.time-range"), Some(&Scope::Flags));
        assert_eq!(winner.get("general.output-dir"), Some(&Scope::User));
        assert_eq!(winner.get("provider.organization-id"), Some(&Scope::Project));
        assert_eq!(winner.get("provider.order-policy"), Some(&Scope::Env));
        assert_eq!(winner.get("team.members"), Some(&Scope::Project));
        assert_eq!(resolved.provenance.changes["provider.organization-id"].len(), 2);
    }

    #[gp_test_utils::logged_test]
    fn missing_optional_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        let paths = paths::Paths {
            user: dir.path().join("absent.toml"),
            project: Some(dir.path().join("also-absent.toml")),
            cli_config: None,
        };
        let resolved = load_with_env(&paths, serde_json::json!({}), &[]).unwrap();
        let general: GeneralConfig = resolved.section("general").unwrap();
        assert_eq!(general, GeneralConfig::default());
    }

    #[gp_test_utils::logged_test]
    fn explicit_config_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let paths = paths::Paths {
            user: dir.path().join("absent.toml"),
            project: None,
            cli_config: Some(dir.path().join("named.toml")),
        };
        assert!(load_with_env(&paths, serde_json::json!({}), &[]).is_err());
    }

    #[gp_test_utils::logged_test]
    fn invalid_values_fail_validation() {
        let dir = TempDir::new().unwrap();
        let user = write(&dir, "user.toml", "[provider]\norder-policy = \"sometimes\"\n");
        let paths = paths::Paths {
            user,
            project: None,
            cli_config: None,
        };
        let err = load_with_env(&paths, serde_json::json!({}), &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("schema validation failed"));
    }

    #[gp_test_utils::logged_test]
    fn flags_cannot_introduce_unknown_sections() {
        let dir = TempDir::new().unwrap();
        let paths = paths::Paths {
            user: dir.path().join("absent.toml"),
            project: None,
            cli_config: None,
        };
        assert!(load_with_env(&paths, serde_json::json!({}), &[("agents.model", "x")]).is_err());
    }
}
