// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use clap::Args;
use gp_report::{ActivitySnapshot, ReportGenerator, ReportSettings};

use crate::AppContext;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Only report on this team member (prints the markdown report)
    #[arg(long, value_name = "USERNAME")]
    pub member: Option<String>,

    /// Directory for report files (overrides general.output-dir)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Report format (overrides reports.format)
    #[arg(long, value_parser = ["markdown", "json"])]
    pub format: Option<String>,
}

impl ReportArgs {
    pub fn config_overrides(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(dir) = &self.output_dir {
            pairs.push(("general.output-dir".to_string(), dir.clone()));
        }
        if let Some(format) = &self.format {
            pairs.push(("reports.format".to_string(), format.clone()));
        }
        pairs
    }

    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        if ctx.team.members.is_empty() {
            tracing::warn!("no team members configured; every commit will be unattributed");
        }

        let generator = ReportGenerator::new(ReportSettings::from_config(&ctx.general, &ctx.reports))?;
        let client = ctx.client()?;
        let snapshot = ActivitySnapshot::collect(&client, ctx.days())
            .await
            .context("collecting repository activity")?;

        match self.member {
            Some(username) => {
                let report = generator.member_report(&snapshot, &ctx.team.members, &username)?;
                println!("{}", generator.render_member(&report)?);
            }
            None => {
                let generated = generator.generate(&snapshot, &ctx.team.members)?;
                for path in &generated.files {
                    println!("{}", path.display());
                }
            }
        }
        Ok(())
    }
}
