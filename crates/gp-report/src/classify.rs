// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Attribution of commits to team members.
//!
//! A commit goes to the first member whose email matches its author email;
//! failing that, the first whose name matches the author name; failing that,
//! the first with a matching alias. Comparisons ignore case.

use std::cmp::Reverse;

use gp_domain_types::{Commit, Repository, TeamMember};
use gp_provider_client::window::parse_timestamp;

/// Bucket name for commits no member claims
pub const UNATTRIBUTED: &str = "unattributed";

#[derive(Debug, Clone, PartialEq)]
pub struct MemberCommits {
    pub member: TeamMember,
    /// Newest first; `repository` holds the repository display name
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// One entry per configured member, in configuration order
    pub members: Vec<MemberCommits>,
    pub unattributed: Vec<Commit>,
}

impl Classification {
    pub fn member(&self, username: &str) -> Option<&MemberCommits> {
        self.members.iter().find(|m| m.member.username == username)
    }

    pub fn total_commits(&self) -> usize {
        self.members.iter().map(|m| m.commits.len()).sum::<usize>() + self.unattributed.len()
    }
}

pub fn attribute<'m>(members: &'m [TeamMember], commit: &Commit) -> Option<&'m TeamMember> {
    attribute_index(members, commit).map(|index| &members[index])
}

fn attribute_index(members: &[TeamMember], commit: &Commit) -> Option<usize> {
    members
        .iter()
        .position(|m| m.matches_email(&commit.author_email))
        .or_else(|| members.iter().position(|m| m.matches_name(&commit.author_name)))
        .or_else(|| {
            members
                .iter()
                .position(|m| m.matches_alias(&commit.author_email, &commit.author_name))
        })
}

pub fn classify(members: &[TeamMember], repositories: &[Repository]) -> Classification {
    let mut buckets: Vec<Vec<Commit>> = vec![Vec::new(); members.len()];
    let mut unattributed = Vec::new();

    for repo in repositories {
        for commit in repo.commits.iter().flatten() {
            let mut commit = commit.clone();
            commit.repository = Some(repo.display_name().to_string());

            match attribute_index(members, &commit) {
                Some(index) => buckets[index].push(commit),
                None => unattributed.push(commit),
            }
        }
    }

    if !unattributed.is_empty() {
        tracing::debug!(count = unattributed.len(), "commits not attributed to any team member");
    }

    sort_newest_first(&mut unattributed);
    let members = members
        .iter()
        .cloned()
        .zip(buckets)
        .map(|(member, mut commits)| {
            sort_newest_first(&mut commits);
            MemberCommits { member, commits }
        })
        .collect();

    Classification { members, unattributed }
}

fn sort_newest_first(commits: &mut [Commit]) {
    commits.sort_by_cached_key(|c| Reverse(parse_timestamp(&c.authored_date).ok()));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    pub(crate) fn member(username: &str, name: &str, email: &str, aliases: &[&str]) -> TeamMember {
        TeamMember {
            username: username.into(),
            name: name.into(),
            email: email.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub(crate) fn commit(id: &str, name: &str, email: &str, date: &str) -> Commit {
        serde_json::from_value(json!({
            "id": id,
            "shortId": id,
            "authorName": name,
            "authorEmail": email,
            "authoredDate": date,
            "committerName": name,
            "committerEmail": email,
            "committedDate": date,
            "message": format!("work on {}", id),
            "stats": {"additions": 10, "deletions": 4, "total": 14}
        }))
        .unwrap()
    }

    pub(crate) fn repo(id: u64, path: &str, commits: Vec<Commit>) -> Repository {
        serde_json::from_value(json!({
            "id": id,
            "name": path,
            "path": path,
            "pathWithNamespace": format!("team/{}", path),
            "lastActivityAt": "2024-01-31T00:00:00Z",
            "commits": commits
        }))
        .unwrap()
    }

    #[gp_test_utils::logged_test]
    fn email_beats_name_and_aliases() {
        let members = vec![
            member("alice", "Alice", "alice@example.com", &["bob@example.com"]),
            member("bob", "Bob", "bob@example.com", &[]),
        ];
        // alias of alice, email of bob: the email match wins
        let c = commit("c1", "Someone", "BOB@example.com", "2024-01-30T00:00:00Z");
        assert_eq!(attribute(&members, &c).map(|m| m.username.as_str()), Some("bob"));

        let by_name = commit("c2", "alice", "laptop@local", "2024-01-30T00:00:00Z");
        assert_eq!(attribute(&members, &by_name).map(|m| m.username.as_str()), Some("alice"));

        let nobody = commit("c3", "Mallory", "m@example.com", "2024-01-30T00:00:00Z");
        assert!(attribute(&members, &nobody).is_none());
    }

    #[gp_test_utils::logged_test]
    fn commits_are_bucketed_and_sorted() {
        let members = vec![
            member("alice", "Alice", "alice@example.com", &["a.old@example.com"]),
            member("bob", "Bob", "bob@example.com", &[]),
        ];
        let repos = vec![
            repo(
                1,
                "api",
                vec![
                    commit("a1", "Alice", "alice@example.com", "2024-01-29T00:00:00Z"),
                    commit("x1", "Ghost", "ghost@example.com", "2024-01-28T00:00:00Z"),
                ],
            ),
            repo(
                2,
                "web",
                vec![commit("a2", "A", "a.old@example.com", "2024-01-30T09:00:00+08:00")],
            ),
        ];

        let classified = classify(&members, &repos);

        let alice = classified.member("alice").unwrap();
        let ids: Vec<&str> = alice.commits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a1"]);
        assert_eq!(alice.commits[0].repository.as_deref(), Some("team/web"));
        assert!(classified.member("bob").unwrap().commits.is_empty());
        assert_eq!(classified.unattributed.len(), 1);
        assert_eq!(classified.total_commits(), 3);
    }
}
