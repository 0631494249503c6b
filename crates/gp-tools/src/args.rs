// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Tool argument objects

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};

pub const DEFAULT_DAYS: u32 = 7;
pub const DEFAULT_REF: &str = "master";

fn default_days() -> u32 {
    DEFAULT_DAYS
}

fn default_ref() -> String {
    DEFAULT_REF.to_string()
}

/// Repository ids are numeric on the provider; agents send them either way
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    match Id::deserialize(deserializer)? {
        Id::Text(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Id::Text(_) => Err(serde::de::Error::custom("identifier must not be empty")),
        Id::Number(n) => Ok(n.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListRepositoriesArgs {
    /// Activity window in days
    #[serde(default = "default_days")]
    #[schemars(range(min = 1))]
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RepositoryArgs {
    /// Repository id or namespaced path
    #[serde(deserialize_with = "id_string")]
    #[schemars(with = "String")]
    pub repository_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RepositoryCommitsArgs {
    #[serde(deserialize_with = "id_string")]
    #[schemars(with = "String")]
    pub repository_id: String,
    /// Branch or tag to list
    #[serde(default = "default_ref")]
    pub ref_name: String,
    #[serde(default = "default_days")]
    #[schemars(range(min = 1))]
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CommitArgs {
    #[serde(deserialize_with = "id_string")]
    #[schemars(with = "String")]
    pub repository_id: String,
    pub commit_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CommitChangesArgs {
    #[serde(deserialize_with = "id_string")]
    #[schemars(with = "String")]
    pub repository_id: String,
    pub from_commit: String,
    pub to_commit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListBranchesArgs {
    #[serde(deserialize_with = "id_string")]
    #[schemars(with = "String")]
    pub repository_id: String,
    #[serde(default = "default_days")]
    #[schemars(range(min = 1))]
    pub days: u32,
}
