// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Which layer set each configuration value

use serde_json::Value as J;
use std::collections::BTreeMap;

/// Configuration scopes in precedence order (lowest first)
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Scope {
    User,
    Project,
    Env,
    CliConfig,
    Flags,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Scope::User => "user",
            Scope::Project => "project",
            Scope::Env => "env",
            Scope::CliConfig => "cli-config",
            Scope::Flags => "flags",
        };
        f.write_str(name)
    }
}

#[derive(Default, Clone, Debug)]
pub struct Provenance {
    /// Dotted key path to the scope that set its final value
    pub winner: BTreeMap<String, Scope>,
    /// Dotted key path to every (scope, value) that touched it, in order
    pub changes: BTreeMap<String, Vec<(Scope, J)>>,
}

/// Record every leaf of `layer` as set by `scope`.
///
/// Arrays are leaves, matching the merge policy that replaces them whole.
/// Nulls are skipped since merging them keeps the previous value.
pub fn record_layer(layer: &J, scope: Scope, out: &mut Provenance, prefix: &str) {
    match layer {
        J::Object(obj) => {
            for (k, v) in obj {
                let pfx = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", prefix, k)
                };
                record_layer(v, scope, out, &pfx);
            }
        }
        J::Null => {}
        _ => {
            out.winner.insert(prefix.to_string(), scope);
            out.changes
                .entry(prefix.to_string())
                .or_default()
                .push((scope, layer.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[gp_test_utils::logged_test]
    fn later_scopes_win_and_history_is_kept() {
        let mut prov = Provenance::default();
        record_layer(&json!({"general": {"time-range": 7}}), Scope::User, &mut prov, "");
        record_layer(&json!({"general": {"time-range": 1, "output-dir": null}}), Scope::Flags, &mut prov, "");

        assert_eq!(prov.winner["general.time-range"], Scope::Flags);
        assert_eq!(
            prov.changes["general.time-range"],
            vec![(Scope::User, json!(7)), (Scope::Flags, json!(1))]
        );
        assert!(!prov.winner.contains_key("general.output-dir"));
        assert_eq!(Scope::CliConfig.to_string(), "cli-config");
    }
}
