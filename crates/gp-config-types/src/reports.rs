// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, schemars::JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// JSON data plus rendered markdown
    #[default]
    Markdown,
    /// JSON data only
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema, Default, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReportsConfig {
    pub format: Option<ReportFormat>,
    /// Write one report per member in addition to the team report
    pub individual_reports: Option<bool>,
    /// Directory with `member_report.md.hbs` / `team_report.md.hbs` overrides
    pub template_dir: Option<String>,
}

impl ReportsConfig {
    pub fn format(&self) -> ReportFormat {
        self.format.unwrap_or_default()
    }

    pub fn individual_reports(&self) -> bool {
        self.individual_reports.unwrap_or(true)
    }
}
