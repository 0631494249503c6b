// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Report documents, serialized as-is to JSON and fed to the templates

use std::collections::BTreeMap;

use gp_domain_types::{Commit, TeamMember};
use serde::Serialize;

use crate::stats::{MemberStats, RepositoryStats};

/// One row of a member's commit table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitLine {
    pub id: String,
    pub short_id: String,
    pub authored_date: String,
    pub repository: String,
    pub branch: Option<String>,
    pub title: String,
    pub additions: u64,
    pub deletions: u64,
}

impl From<&Commit> for CommitLine {
    fn from(commit: &Commit) -> Self {
        Self {
            id: commit.id.clone(),
            short_id: commit.short_id.clone(),
            authored_date: commit.authored_date.clone(),
            repository: commit.repository.clone().unwrap_or_default(),
            branch: commit.branch_name.clone(),
            title: commit.title().to_string(),
            additions: commit.additions(),
            deletions: commit.deletions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberReport {
    pub member: TeamMember,
    pub time_period: String,
    pub days: u32,
    pub stats: MemberStats,
    pub commits: Vec<CommitLine>,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub project_name: String,
    pub time_period: String,
    pub days: u32,
    pub team_size: usize,
    pub total_commits: usize,
    pub unattributed_commits: usize,
    /// Commit count per member username
    pub commit_distribution: BTreeMap<String, usize>,
    pub top_active_repositories: Vec<RepositoryStats>,
    pub members: Vec<MemberStats>,
    pub generated_at: String,
}

/// Everything one generation run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reports {
    pub members: Vec<MemberReport>,
    pub team: TeamReport,
}
