// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Direct provider reads printed as JSON

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::AppContext;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn list_repositories(ctx: &AppContext) -> Result<()> {
    let repos = ctx.client()?.list_active_repositories(ctx.days()).await?;
    print_json(&repos)
}

#[derive(Args, Debug)]
pub struct RepoArgs {
    /// Repository id or namespaced path
    pub repository_id: String,
}

impl RepoArgs {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        print_json(&ctx.client()?.get_repository(&self.repository_id).await?)
    }
}

#[derive(Args, Debug)]
pub struct BranchesArgs {
    pub repository_id: String,
    /// List every branch instead of those updated in the window
    #[arg(long)]
    pub all: bool,
}

impl BranchesArgs {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let days = (!self.all).then(|| ctx.days());
        print_json(&ctx.client()?.list_branches(&self.repository_id, days).await?)
    }
}

#[derive(Args, Debug)]
pub struct CommitsArgs {
    pub repository_id: String,
    /// Branch to list; without it, commits of every active branch are merged
    #[arg(long = "ref", value_name = "REF")]
    pub ref_name: Option<String>,
    /// Ignore the activity window
    #[arg(long)]
    pub all_time: bool,
}

impl CommitsArgs {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let days = (!self.all_time).then(|| ctx.days());
        let commits = ctx
            .client()?
            .list_commits(&self.repository_id, self.ref_name.as_deref(), days)
            .await?;
        print_json(&commits)
    }
}

#[derive(Args, Debug)]
pub struct CommitArgs {
    pub repository_id: String,
    pub sha: String,
}

impl CommitArgs {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        print_json(&ctx.client()?.get_commit(&self.repository_id, &self.sha).await?)
    }
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    pub repository_id: String,
    pub from: String,
    pub to: String,
}

impl DiffArgs {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let diffs = ctx
            .client()?
            .get_commit_diff(&self.repository_id, &self.from, &self.to)
            .await?;
        print_json(&diffs)
    }
}
