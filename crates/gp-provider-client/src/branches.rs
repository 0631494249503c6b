// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Branch listings, most recently updated first

use gp_domain_types::Branch;

use crate::context::{path_segment, FetchContext};
use crate::error::ProviderResult;
use crate::pagination::{PageControl, PagedQuery, WindowScan, WindowVerdict};
use crate::window::{parse_timestamp, ActivityWindow};

pub const BRANCH_SORT: &str = "updated_desc";

pub struct BranchFetcher<'a> {
    ctx: FetchContext<'a>,
}

impl<'a> BranchFetcher<'a> {
    pub fn new(ctx: FetchContext<'a>) -> Self {
        Self { ctx }
    }

    /// Branches of `repo_id` whose latest commit falls in the last `days`
    /// days, or every branch when `days` is `None`.
    ///
    /// Order is the server's (updated, descending).
    pub async fn list_branches(&self, repo_id: &str, days: Option<u32>) -> ProviderResult<Vec<Branch>> {
        self.list_in_window(repo_id, self.ctx.window(days)?).await
    }

    pub(crate) async fn list_in_window(
        &self,
        repo_id: &str,
        window: Option<ActivityWindow>,
    ) -> ProviderResult<Vec<Branch>> {
        let mut branches = Vec::new();
        let mut scan = WindowScan::new(window, self.ctx.options.order_policy, "branch");

        let query = PagedQuery {
            gateway: self.ctx.gateway,
            path: format!("/repositories/{}/branches", path_segment(repo_id)),
            params: vec![("sort".to_string(), BRANCH_SORT.to_string())],
            page_size: self.ctx.options.page_size,
            entity: "branch",
        };

        query
            .run(|items| {
                for item in items {
                    let branch: Branch = match serde_json::from_value(item) {
                        Ok(branch) => branch,
                        Err(err) => {
                            tracing::warn!(repository = repo_id, error = %err, "skipping malformed branch entry");
                            continue;
                        }
                    };

                    if window.is_none() {
                        branches.push(branch);
                        continue;
                    }

                    let updated = match parse_timestamp(branch.last_updated()) {
                        Ok(ts) => ts,
                        Err(err) => {
                            tracing::warn!(
                                repository = repo_id,
                                branch = %branch.name,
                                error = %err,
                                "skipping branch with unreadable commit date"
                            );
                            continue;
                        }
                    };

                    match scan.classify(updated, &branch.name) {
                        WindowVerdict::Keep => branches.push(branch),
                        WindowVerdict::Skip => {}
                        WindowVerdict::StopHere => {
                            tracing::debug!(
                                repository = repo_id,
                                branch = %branch.name,
                                "branch outside window; remaining branches are older"
                            );
                            return PageControl::Stop;
                        }
                    }
                }
                PageControl::Continue
            })
            .await?;

        tracing::debug!(repository = repo_id, count = branches.len(), "listed branches");
        Ok(branches)
    }
}
