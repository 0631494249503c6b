// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Per-member and per-repository commit statistics

use std::collections::{BTreeMap, BTreeSet};

use gp_domain_types::{Commit, TeamMember};
use gp_provider_client::window::parse_timestamp;
use serde::Serialize;

use crate::classify::{Classification, UNATTRIBUTED};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberStats {
    pub username: String,
    pub name: String,
    pub email: String,
    pub total_commits: usize,
    pub additions: u64,
    pub deletions: u64,
    /// Distinct repositories, sorted
    pub repositories: Vec<String>,
    /// Distinct UTC calendar days with at least one commit
    pub active_days: usize,
    /// Commits per day over the whole window
    pub commit_frequency: f64,
}

impl MemberStats {
    pub fn compute(member: &TeamMember, commits: &[Commit], days: u32) -> Self {
        let repositories: BTreeSet<&str> = commits.iter().filter_map(|c| c.repository.as_deref()).collect();
        let active_days: BTreeSet<_> = commits
            .iter()
            .filter_map(|c| parse_timestamp(&c.authored_date).ok())
            .map(|ts| ts.date_naive())
            .collect();

        Self {
            username: member.username.clone(),
            name: member.name.clone(),
            email: member.email.clone(),
            total_commits: commits.len(),
            additions: commits.iter().map(Commit::additions).sum(),
            deletions: commits.iter().map(Commit::deletions).sum(),
            repositories: repositories.into_iter().map(str::to_string).collect(),
            active_days: active_days.len(),
            commit_frequency: commits.len() as f64 / f64::from(days.max(1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryStats {
    pub repository: String,
    pub total_commits: usize,
    pub additions: u64,
    pub deletions: u64,
    /// Commits per member username; unclaimed commits count under `unattributed`
    pub member_commits: BTreeMap<String, usize>,
}

/// Statistics for every repository with commits, most commits first
pub fn repository_stats(classification: &Classification) -> Vec<RepositoryStats> {
    let mut by_repo: BTreeMap<String, RepositoryStats> = BTreeMap::new();

    let attributed = classification
        .members
        .iter()
        .flat_map(|m| m.commits.iter().map(move |c| (m.member.username.as_str(), c)));
    let unattributed = classification.unattributed.iter().map(|c| (UNATTRIBUTED, c));

    for (owner, commit) in attributed.chain(unattributed) {
        let name = commit.repository.clone().unwrap_or_default();
        let entry = by_repo.entry(name.clone()).or_insert_with(|| RepositoryStats {
            repository: name,
            total_commits: 0,
            additions: 0,
            deletions: 0,
            member_commits: BTreeMap::new(),
        });
        entry.total_commits += 1;
        entry.additions += commit.additions();
        entry.deletions += commit.deletions();
        *entry.member_commits.entry(owner.to_string()).or_default() += 1;
    }

    let mut ranked: Vec<RepositoryStats> = by_repo.into_values().collect();
    // stable: ties keep name order
    ranked.sort_by(|a, b| b.total_commits.cmp(&a.total_commits));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::classify::tests::{commit, member, repo};
    use pretty_assertions::assert_eq;

    #[gp_test_utils::logged_test]
    fn member_stats_count_days_and_repositories() {
        let members = vec![member("alice", "Alice", "alice@example.com", &[])];
        let repos = vec![
            repo(
                1,
                "api",
                vec![
                    commit("a1", "Alice", "alice@example.com", "2024-01-29T10:00:00Z"),
                    commit("a2", "Alice", "alice@example.com", "2024-01-29T23:00:00Z"),
                ],
            ),
            repo(
                2,
                "web",
                // 2024-01-29T17:00Z, same UTC day as the others
                vec![commit("a3", "Alice", "alice@example.com", "2024-01-30T01:00:00+08:00")],
            ),
        ];
        let classified = classify(&members, &repos);
        let stats = MemberStats::compute(&members[0], &classified.members[0].commits, 7);

        assert_eq!(stats.total_commits, 3);
        assert_eq!(stats.additions, 30);
        assert_eq!(stats.deletions, 12);
        assert_eq!(stats.repositories, vec!["team/api", "team/web"]);
        assert_eq!(stats.active_days, 1);
        assert!((stats.commit_frequency - 3.0 / 7.0).abs() < 1e-9);
    }

    #[gp_test_utils::logged_test]
    fn repositories_rank_by_commits() {
        let members = vec![
            member("alice", "Alice", "alice@example.com", &[]),
            member("bob", "Bob", "bob@example.com", &[]),
        ];
        let repos = vec![
            repo(1, "small", vec![commit("s1", "Bob", "bob@example.com", "2024-01-29T00:00:00Z")]),
            repo(
                2,
                "busy",
                vec![
                    commit("b1", "Alice", "alice@example.com", "2024-01-29T00:00:00Z"),
                    commit("b2", "Bob", "bob@example.com", "2024-01-28T00:00:00Z"),
                    commit("b3", "Eve", "eve@example.com", "2024-01-27T00:00:00Z"),
                ],
            ),
        ];

        let ranked = repository_stats(&classify(&members, &repos));

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].repository, "team/busy");
        assert_eq!(ranked[0].total_commits, 3);
        assert_eq!(ranked[0].member_commits.get("unattributed"), Some(&1));
        assert_eq!(ranked[0].member_commits.get("alice"), Some(&1));
        assert_eq!(ranked[1].repository, "team/small");
    }
}
