// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Branch-related domain types

use serde::{Deserialize, Serialize};

use crate::commit::{canonical_message, CommitStats};

/// Latest commit embedded in a branch listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCommit {
    pub id: String,
    pub short_id: String,
    pub author_name: String,
    pub author_email: String,
    pub authored_date: String,
    pub committer_name: String,
    pub committer_email: String,
    pub committed_date: String,
    #[serde(deserialize_with = "canonical_message")]
    pub message: String,
    #[serde(default)]
    pub parent_ids: Vec<String>,
    #[serde(default)]
    pub stats: Option<CommitStats>,
    #[serde(default)]
    pub web_url: Option<String>,
}

/// Branch information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub default_branch: bool,
    #[serde(default)]
    pub protected: bool,
    pub commit: BranchCommit,
    #[serde(default)]
    pub web_url: Option<String>,
}

impl Branch {
    /// Timestamp used for ordering and windowing branches
    pub fn last_updated(&self) -> &str {
        &self.commit.committed_date
    }
}
