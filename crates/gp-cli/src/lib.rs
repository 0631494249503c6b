// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use clap::Subcommand;
use gp_logging::CliLoggingArgs;

pub mod config_commands;
pub mod context;
pub mod provider_commands;
pub mod report_commands;
pub mod tool_commands;

pub use context::AppContext;

#[derive(clap::Parser, Debug)]
#[command(
    name = "gitpulse",
    about = "Team commit activity from a Codeup-style Git provider",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Extra configuration file, applied above user, project and environment
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Activity window in days (overrides general.time-range)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Override a configuration value, e.g. --set provider.timeout-secs=60
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    pub set: Vec<String>,

    #[command(flatten)]
    pub logging: CliLoggingArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List repositories with commits in the window, with those commits
    Repos,
    /// Show one repository
    Repo(provider_commands::RepoArgs),
    /// List branches updated in the window
    Branches(provider_commands::BranchesArgs),
    /// List commits of one branch, or of every active branch
    Commits(provider_commands::CommitsArgs),
    /// Show one commit
    Commit(provider_commands::CommitArgs),
    /// Show file changes between two commits
    Diff(provider_commands::DiffArgs),
    /// Write member and team activity reports
    Report(report_commands::ReportArgs),
    /// Inspect or invoke the JSON tools
    Tools {
        #[command(subcommand)]
        subcommand: tool_commands::ToolCommands,
    },
    /// Serve the JSON tools over stdin/stdout, one request per line
    Serve,
    /// Inspect the resolved configuration
    Config {
        #[command(subcommand)]
        subcommand: config_commands::ConfigCommands,
    },
}

impl Cli {
    /// `--set` pairs plus the flags that map onto configuration keys.
    ///
    /// Later entries win, so dedicated flags override `--set`.
    pub fn flag_overrides(&self) -> anyhow::Result<Vec<(String, String)>> {
        let mut pairs = self
            .set
            .iter()
            .map(|flag| gp_config_core::env::parse_set_flag(flag))
            .collect::<anyhow::Result<Vec<_>>>()?;

        if let Some(days) = self.days {
            pairs.push(("general.time-range".into(), days.to_string()));
        }
        if let Commands::Report(args) = &self.command {
            pairs.extend(args.config_overrides());
        }
        Ok(pairs)
    }
}

pub use clap::Parser;
