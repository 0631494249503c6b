// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Canonical shape of the whole configuration.
//!
//! Used for schema generation and validation only; consumers read their own
//! section through [`crate::Resolved::section`].

use gp_config_types::{GeneralConfig, ProviderConfig, ReportsConfig, TeamSection};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct SchemaRoot {
    pub general: Option<GeneralConfig>,
    pub provider: Option<ProviderConfig>,
    pub team: Option<TeamSection>,
    pub reports: Option<ReportsConfig>,
}

/// The generated JSON schema, pretty-printed
pub fn schema_json() -> String {
    let schema = schemars::schema_for!(SchemaRoot);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
