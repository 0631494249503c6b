// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Commit listings per branch and merged across branches

use std::cmp::Reverse;
use std::collections::HashSet;

use gp_domain_types::{Commit, CommitDiff};
use serde::Deserialize;
use serde_json::Value;

use crate::branches::BranchFetcher;
use crate::context::{path_segment, FetchContext};
use crate::error::{ProviderError, ProviderResult};
use crate::pagination::{PageControl, PagedQuery, WindowScan, WindowVerdict};
use crate::window::{parse_timestamp, ActivityWindow};

pub struct CommitFetcher<'a> {
    ctx: FetchContext<'a>,
}

impl<'a> CommitFetcher<'a> {
    pub fn new(ctx: FetchContext<'a>) -> Self {
        Self { ctx }
    }

    /// Commits reachable from `branch`, newest first.
    ///
    /// With a window, `since` is sent to the server and every commit's
    /// `authoredDate` is checked again locally.
    pub async fn list_branch_commits(
        &self,
        repo_id: &str,
        branch: &str,
        days: Option<u32>,
    ) -> ProviderResult<Vec<Commit>> {
        self.branch_commits_in_window(repo_id, branch, self.ctx.window(days)?).await
    }

    /// Commits of every branch active in the window, deduplicated by id and
    /// sorted by `authoredDate`, newest first.
    ///
    /// A failing branch is logged and skipped. Only a failure of the branch
    /// listing's first page is returned.
    pub async fn list_all_commits(&self, repo_id: &str, days: Option<u32>) -> ProviderResult<Vec<Commit>> {
        self.all_commits_in_window(repo_id, self.ctx.window(days)?).await
    }

    pub(crate) async fn all_commits_in_window(
        &self,
        repo_id: &str,
        window: Option<ActivityWindow>,
    ) -> ProviderResult<Vec<Commit>> {
        let branches = BranchFetcher::new(self.ctx).list_in_window(repo_id, window).await?;

        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for branch in &branches {
            match self.branch_commits_in_window(repo_id, &branch.name, window).await {
                Ok(commits) => {
                    let before = merged.len();
                    merged.extend(commits.into_iter().filter(|c| seen.insert(c.id.clone())));
                    tracing::debug!(
                        repository = repo_id,
                        branch = %branch.name,
                        added = merged.len() - before,
                        "merged branch commits"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        repository = repo_id,
                        branch = %branch.name,
                        error = %err,
                        "skipping branch whose commits could not be listed"
                    );
                }
            }
        }

        sort_newest_first(&mut merged);
        Ok(merged)
    }

    pub(crate) async fn branch_commits_in_window(
        &self,
        repo_id: &str,
        branch: &str,
        window: Option<ActivityWindow>,
    ) -> ProviderResult<Vec<Commit>> {
        let mut commits = Vec::new();
        let mut scan = WindowScan::new(window, self.ctx.options.order_policy, "commit");

        let mut params = vec![("refName".to_string(), branch.to_string())];
        if let Some(window) = window {
            params.push(("since".to_string(), window.since_param()));
        }

        let query = PagedQuery {
            gateway: self.ctx.gateway,
            path: format!("/repositories/{}/commits", path_segment(repo_id)),
            params,
            page_size: self.ctx.options.page_size,
            entity: "commit",
        };

        query
            .run(|items| {
                for item in items {
                    let Some(commit) = parse_commit(item, repo_id) else {
                        continue;
                    };
                    let commit = commit.with_origin(repo_id, Some(branch));

                    if window.is_none() {
                        commits.push(commit);
                        continue;
                    }

                    let authored = match parse_timestamp(&commit.authored_date) {
                        Ok(ts) => ts,
                        Err(err) => {
                            tracing::warn!(
                                repository = repo_id,
                                commit = %commit.id,
                                error = %err,
                                "skipping commit with unreadable authored date"
                            );
                            continue;
                        }
                    };

                    match scan.classify(authored, &commit.id) {
                        WindowVerdict::Keep => commits.push(commit),
                        WindowVerdict::Skip => {}
                        WindowVerdict::StopHere => {
                            tracing::debug!(
                                repository = repo_id,
                                branch,
                                commit = %commit.short_id,
                                "commit outside window; remaining commits are older"
                            );
                            return PageControl::Stop;
                        }
                    }
                }
                PageControl::Continue
            })
            .await?;

        Ok(commits)
    }

    /// One commit with its line statistics
    pub async fn get_commit(&self, repo_id: &str, sha: &str) -> ProviderResult<Commit> {
        let path = format!(
            "/repositories/{}/commits/{}",
            path_segment(repo_id),
            path_segment(sha)
        );
        let value = self.ctx.gateway.get(&path, &[]).await?;
        let commit: Commit = serde_json::from_value(value)?;
        Ok(commit.with_origin(repo_id, None))
    }

    /// File-level differences between two commits
    pub async fn get_commit_diff(&self, repo_id: &str, from: &str, to: &str) -> ProviderResult<Vec<CommitDiff>> {
        #[derive(Deserialize)]
        struct CompareResponse {
            #[serde(default)]
            diffs: Vec<CommitDiff>,
        }

        let path = format!("/repositories/{}/compares", path_segment(repo_id));
        let query = [
            ("from".to_string(), from.to_string()),
            ("to".to_string(), to.to_string()),
        ];
        let value = self.ctx.gateway.get(&path, &query).await?;
        if !value.is_object() {
            return Err(ProviderError::Shape {
                path,
                message: "expected a compare object with a `diffs` array".into(),
            });
        }
        let response: CompareResponse = serde_json::from_value(value)?;
        Ok(response.diffs)
    }
}

fn parse_commit(item: Value, repo_id: &str) -> Option<Commit> {
    let id = item.get("id").and_then(Value::as_str).unwrap_or("<unknown>").to_string();
    match serde_json::from_value::<Commit>(item) {
        Ok(commit) => Some(commit),
        Err(err) => {
            tracing::warn!(repository = repo_id, commit = %id, error = %err, "skipping malformed commit entry");
            None
        }
    }
}

/// Stable sort by authored date, newest first; unreadable dates go last
pub(crate) fn sort_newest_first(commits: &mut [Commit]) {
    commits.sort_by_cached_key(|c| Reverse(parse_timestamp(&c.authored_date).ok()));
}
