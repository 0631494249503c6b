// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Commit-related domain types

use serde::{Deserialize, Deserializer, Serialize};

/// Line statistics attached to a commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub total: u64,
}

/// A commit as returned by the commit listing and commit detail endpoints.
///
/// `id` is the deduplication key when the same commit is reachable from
/// several branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
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
    /// Branch whose listing first surfaced this commit
    #[serde(default)]
    pub branch_name: Option<String>,
    /// Repository the commit was fetched from (not sent by the provider)
    #[serde(default)]
    pub repository: Option<String>,
}

impl Commit {
    /// Tag the commit with the branch and repository it was fetched from
    pub fn with_origin(mut self, repository: &str, branch: Option<&str>) -> Self {
        self.repository = Some(repository.to_string());
        self.branch_name = branch.map(str::to_string);
        self
    }

    /// First line of the commit message
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn additions(&self) -> u64 {
        self.stats.map(|s| s.additions).unwrap_or_default()
    }

    pub fn deletions(&self) -> u64 {
        self.stats.map(|s| s.deletions).unwrap_or_default()
    }
}

/// One file entry of a `compares` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDiff {
    #[serde(alias = "oldPath")]
    pub old_path: String,
    #[serde(alias = "newPath")]
    pub new_path: String,
    pub diff: String,
    #[serde(alias = "deletedFile")]
    pub deleted_file: bool,
    #[serde(alias = "newFile")]
    pub new_file: bool,
    #[serde(alias = "renamedFile")]
    pub renamed_file: bool,
}

/// Strip every trailing newline from a commit message.
///
/// Interior newlines are preserved; downstream comparisons rely on the
/// stripped form.
pub fn strip_trailing_newlines(message: &str) -> &str {
    message.trim_end_matches('\n')
}

pub(crate) fn canonical_message<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(strip_trailing_newlines(&raw).to_string())
}
