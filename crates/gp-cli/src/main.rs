// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use gp_cli::{AppContext, Cli, Commands, Parser};

const COMPONENT: &str = "gitpulse";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // stdout carries command output and the tool protocol; logs go to stderr or a file
    cli.logging.clone().init(COMPONENT)?;

    let ctx = AppContext::load(&cli)?;
    match cli.command {
        Commands::Repos => gp_cli::provider_commands::list_repositories(&ctx).await,
        Commands::Repo(args) => args.run(&ctx).await,
        Commands::Branches(args) => args.run(&ctx).await,
        Commands::Commits(args) => args.run(&ctx).await,
        Commands::Commit(args) => args.run(&ctx).await,
        Commands::Diff(args) => args.run(&ctx).await,
        Commands::Report(args) => args.run(&ctx).await,
        Commands::Tools { subcommand } => subcommand.run(&ctx).await,
        Commands::Serve => gp_cli::tool_commands::serve_stdio(&ctx).await,
        Commands::Config { subcommand } => subcommand.run(&ctx),
    }
}
