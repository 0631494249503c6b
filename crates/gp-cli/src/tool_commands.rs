// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use clap::Subcommand;
use gp_tools::{Tool, ToolRegistry};
use serde_json::Value;
use tokio::io::BufReader;

use crate::AppContext;

#[derive(Subcommand, Debug)]
pub enum ToolCommands {
    /// Print tool descriptors with their argument schemas
    List,
    /// Invoke one tool and print its JSON output
    Call {
        name: String,
        /// JSON object of arguments
        #[arg(default_value = "{}")]
        arguments: String,
    },
}

impl ToolCommands {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self {
            ToolCommands::List => {
                let descriptors: Vec<_> = Tool::ALL.into_iter().map(Tool::descriptor).collect();
                println!("{}", serde_json::to_string_pretty(&descriptors)?);
                Ok(())
            }
            ToolCommands::Call { name, arguments } => {
                let arguments: Value =
                    serde_json::from_str(&arguments).context("tool arguments must be a JSON object")?;
                let registry = ToolRegistry::new(ctx.client()?);
                println!("{}", registry.call(&name, arguments).await?);
                Ok(())
            }
        }
    }
}

pub async fn serve_stdio(ctx: &AppContext) -> Result<()> {
    let registry = ToolRegistry::new(ctx.client()?);
    let stdin = BufReader::new(tokio::io::stdin());
    gp_tools::serve(&registry, stdin, tokio::io::stdout()).await?;
    Ok(())
}
