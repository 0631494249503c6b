// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Repository-related domain types

use serde::{Deserialize, Serialize};

use crate::commit::Commit;

/// Repository visibility as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Internal,
    Public,
    #[serde(other)]
    Unknown,
}

/// Repository information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub last_activity_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub namespace_id: Option<u64>,
    #[serde(default)]
    pub path_with_namespace: Option<String>,
    #[serde(default)]
    pub repository_size: Option<String>,
    /// Commits inside the requested activity window; attached after fetch
    #[serde(default)]
    pub commits: Option<Vec<Commit>>,
}

impl Repository {
    /// Identifier used in `/repositories/{id}` paths
    ///
    /// Falls back to the namespaced path, which the provider also accepts.
    pub fn key(&self) -> String {
        match (self.id, &self.path_with_namespace) {
            (Some(id), _) => id.to_string(),
            (None, Some(path)) => path.clone(),
            (None, None) => self.path.clone(),
        }
    }

    /// Human-readable label for logs and reports
    pub fn display_name(&self) -> &str {
        self.path_with_namespace.as_deref().unwrap_or(&self.name)
    }

    pub fn commit_count(&self) -> usize {
        self.commits.as_ref().map_or(0, Vec::len)
    }
}
