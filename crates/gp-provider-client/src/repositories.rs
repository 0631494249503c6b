// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Active repository discovery

use gp_domain_types::Repository;

use crate::commits::CommitFetcher;
use crate::context::{path_segment, FetchContext};
use crate::error::ProviderResult;
use crate::pagination::{PageControl, PagedQuery, WindowScan, WindowVerdict};
use crate::window::{parse_timestamp, ActivityWindow};

pub const REPOSITORY_ORDER_BY: &str = "last_activity_at";
pub const REPOSITORY_SORT: &str = "desc";

pub struct RepositoryFetcher<'a> {
    ctx: FetchContext<'a>,
}

impl<'a> RepositoryFetcher<'a> {
    pub fn new(ctx: FetchContext<'a>) -> Self {
        Self { ctx }
    }

    /// Repositories with at least one commit in the last `days` days, each
    /// carrying those commits.
    ///
    /// Repositories are listed by last activity, newest first, and the
    /// listing stops at the first one outside the window. A repository whose
    /// commits cannot be fetched is logged and left out.
    pub async fn list_active_repositories(&self, days: u32) -> ProviderResult<Vec<Repository>> {
        let window = ActivityWindow::last_days(days, self.ctx.clock)?;
        let candidates = self.recently_active(window).await?;

        let commits = CommitFetcher::new(self.ctx);
        let mut active = Vec::with_capacity(candidates.len());
        for mut repo in candidates {
            let key = repo.key();
            match commits.all_commits_in_window(&key, Some(window)).await {
                Ok(found) if !found.is_empty() => {
                    tracing::debug!(repository = %repo.display_name(), commits = found.len(), "repository active");
                    repo.commits = Some(found);
                    active.push(repo);
                }
                Ok(_) => {
                    tracing::debug!(repository = %repo.display_name(), "no commits in window");
                }
                Err(err) if err.is_not_found() => {
                    tracing::info!(repository = %repo.display_name(), "repository not found or not accessible; skipping");
                }
                Err(err) => {
                    tracing::warn!(repository = %repo.display_name(), error = %err, "failed to fetch repository commits; skipping");
                }
            }
        }

        tracing::info!(days, active = active.len(), "listed active repositories");
        Ok(active)
    }

    /// Repositories whose `lastActivityAt` is inside the window
    async fn recently_active(&self, window: ActivityWindow) -> ProviderResult<Vec<Repository>> {
        let mut candidates = Vec::new();
        let mut scan = WindowScan::new(Some(window), self.ctx.options.order_policy, "repository");

        let query = PagedQuery {
            gateway: self.ctx.gateway,
            path: "/repositories".to_string(),
            params: vec![
                ("orderBy".to_string(), REPOSITORY_ORDER_BY.to_string()),
                ("sort".to_string(), REPOSITORY_SORT.to_string()),
            ],
            page_size: self.ctx.options.page_size,
            entity: "repository",
        };

        query
            .run(|items| {
                for item in items {
                    let repo: Repository = match serde_json::from_value(item) {
                        Ok(repo) => repo,
                        Err(err) => {
                            tracing::warn!(error = %err, "skipping malformed repository entry");
                            continue;
                        }
                    };

                    let last_activity = repo
                        .last_activity_at
                        .as_deref()
                        .map(parse_timestamp)
                        .transpose();
                    let last_activity = match last_activity {
                        Ok(Some(ts)) => ts,
                        Ok(None) => {
                            tracing::warn!(repository = %repo.display_name(), "skipping repository without lastActivityAt");
                            continue;
                        }
                        Err(err) => {
                            tracing::warn!(repository = %repo.display_name(), error = %err, "skipping repository with unreadable lastActivityAt");
                            continue;
                        }
                    };

                    match scan.classify(last_activity, repo.display_name()) {
                        WindowVerdict::Keep => candidates.push(repo),
                        WindowVerdict::Skip => {}
                        WindowVerdict::StopHere => {
                            tracing::debug!(
                                repository = %repo.display_name(),
                                "repository outside window; remaining repositories are older"
                            );
                            return PageControl::Stop;
                        }
                    }
                }
                PageControl::Continue
            })
            .await?;

        Ok(candidates)
    }

    pub async fn get_repository(&self, repo_id: &str) -> ProviderResult<Repository> {
        let path = format!("/repositories/{}", path_segment(repo_id));
        let value = self.ctx.gateway.get(&path, &[]).await?;
        Ok(serde_json::from_value(value)?)
    }
}
