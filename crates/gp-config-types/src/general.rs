// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};

pub const DEFAULT_TIME_RANGE_DAYS: u32 = 7;
pub const DEFAULT_OUTPUT_DIR: &str = "./reports";

#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema, Default, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneralConfig {
    /// Project name shown in report headers
    pub project_name: Option<String>,
    /// Default activity window in days
    #[schemars(range(min = 1))]
    pub time_range: Option<u32>,
    /// Directory that receives generated reports
    pub output_dir: Option<String>,
}

impl GeneralConfig {
    pub fn time_range_days(&self) -> u32 {
        self.time_range.unwrap_or(DEFAULT_TIME_RANGE_DAYS)
    }

    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or("gitpulse")
    }
}
