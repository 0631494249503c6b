// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Facade bundling a gateway, a clock and fetch options

use std::sync::Arc;
use std::time::Duration;

use gp_config_types::ProviderConfig;
use gp_domain_types::{Branch, Commit, CommitDiff, Repository};

use crate::auth::TokenAuth;
use crate::branches::BranchFetcher;
use crate::commits::CommitFetcher;
use crate::context::{FetchContext, FetchOptions};
use crate::error::{ProviderError, ProviderResult};
use crate::gateway::{ApiGateway, HttpGateway};
use crate::repositories::RepositoryFetcher;
use crate::window::{Clock, SystemClock};

/// Everything needed to reach one provider organization
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub auth: TokenAuth,
    pub timeout: Duration,
    pub fetch: FetchOptions,
}

impl ProviderSettings {
    /// Build settings from the `provider` configuration section.
    ///
    /// Requires an access token and either `base-url` or `organization-id`.
    pub fn from_config(config: &ProviderConfig) -> ProviderResult<Self> {
        let base_url = config.resolved_base_url().ok_or_else(|| {
            ProviderError::Config("provider.organization-id (or provider.base-url) is not set".into())
        })?;
        let token = config
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::Config("provider.access-token is not set".into()))?;

        Ok(Self {
            base_url,
            auth: TokenAuth::with_header(config.token_header(), token),
            timeout: Duration::from_secs(config.timeout_secs()),
            fetch: FetchOptions {
                order_policy: config.order_policy(),
                ..FetchOptions::default()
            },
        })
    }
}

/// Entry point for all provider reads
#[derive(Clone)]
pub struct ProviderClient {
    gateway: Arc<dyn ApiGateway>,
    clock: Arc<dyn Clock>,
    options: FetchOptions,
}

impl ProviderClient {
    pub fn new(gateway: Arc<dyn ApiGateway>, options: FetchOptions) -> Self {
        Self {
            gateway,
            clock: Arc::new(SystemClock),
            options,
        }
    }

    /// Client over HTTP for the given settings
    pub fn connect(settings: &ProviderSettings) -> ProviderResult<Self> {
        let gateway = HttpGateway::from_url(&settings.base_url, settings.auth.clone(), settings.timeout)?;
        tracing::debug!(base_url = %settings.base_url, token_header = settings.auth.header_name(), "provider client ready");
        Ok(Self::new(Arc::new(gateway), settings.fetch))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> FetchOptions {
        self.options
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn ctx(&self) -> FetchContext<'_> {
        FetchContext::new(self.gateway.as_ref(), self.clock.as_ref(), self.options)
    }

    pub async fn list_active_repositories(&self, days: u32) -> ProviderResult<Vec<Repository>> {
        RepositoryFetcher::new(self.ctx()).list_active_repositories(days).await
    }

    pub async fn get_repository(&self, repo_id: &str) -> ProviderResult<Repository> {
        RepositoryFetcher::new(self.ctx()).get_repository(repo_id).await
    }

    pub async fn list_branches(&self, repo_id: &str, days: Option<u32>) -> ProviderResult<Vec<Branch>> {
        BranchFetcher::new(self.ctx()).list_branches(repo_id, days).await
    }

    /// Commits of one branch when `ref_name` is given, else of every branch
    /// active in the window
    pub async fn list_commits(
        &self,
        repo_id: &str,
        ref_name: Option<&str>,
        days: Option<u32>,
    ) -> ProviderResult<Vec<Commit>> {
        let fetcher = CommitFetcher::new(self.ctx());
        match ref_name {
            Some(branch) => fetcher.list_branch_commits(repo_id, branch, days).await,
            None => fetcher.list_all_commits(repo_id, days).await,
        }
    }

    pub async fn get_commit(&self, repo_id: &str, sha: &str) -> ProviderResult<Commit> {
        CommitFetcher::new(self.ctx()).get_commit(repo_id, sha).await
    }

    pub async fn get_commit_diff(&self, repo_id: &str, from: &str, to: &str) -> ProviderResult<Vec<CommitDiff>> {
        CommitFetcher::new(self.ctx()).get_commit_diff(repo_id, from, to).await
    }
}
