// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Provider data a report is computed from

use chrono::{DateTime, Utc};
use gp_domain_types::Repository;
use gp_provider_client::{ActivityWindow, ProviderClient, ProviderResult};

/// Active repositories of one window, each carrying its commits
#[derive(Debug, Clone)]
pub struct ActivitySnapshot {
    pub days: u32,
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub repositories: Vec<Repository>,
}

impl ActivitySnapshot {
    pub async fn collect(client: &ProviderClient, days: u32) -> ProviderResult<Self> {
        let until = client.clock().now();
        let window = ActivityWindow::last_days(days, client.clock())?;
        let repositories = client.list_active_repositories(days).await?;
        tracing::info!(days, repositories = repositories.len(), "collected activity snapshot");
        Ok(Self::new(days, window, until, repositories))
    }

    pub fn new(days: u32, window: ActivityWindow, until: DateTime<Utc>, repositories: Vec<Repository>) -> Self {
        Self {
            days,
            since: window.since(),
            until,
            repositories,
        }
    }

    /// e.g. `2024-01-24 to 2024-01-31`
    pub fn time_period(&self) -> String {
        format!("{} to {}", self.since.format("%Y-%m-%d"), self.until.format("%Y-%m-%d"))
    }

    pub fn commit_count(&self) -> usize {
        self.repositories.iter().map(Repository::commit_count).sum()
    }
}
