// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Resolved configuration and the clients built from it

use std::path::Path;

use anyhow::{Context, Result};
use gp_config_core::{load_all, paths, Resolved};
use gp_config_types::{GeneralConfig, ProviderConfig, ReportsConfig, TeamSection};
use gp_provider_client::{ProviderClient, ProviderSettings};

use crate::Cli;

pub struct AppContext {
    pub resolved: Resolved,
    pub general: GeneralConfig,
    pub provider: ProviderConfig,
    pub team: TeamSection,
    pub reports: ReportsConfig,
}

impl AppContext {
    pub fn load(cli: &Cli) -> Result<Self> {
        let overrides = cli.flag_overrides()?;
        let pairs: Vec<(&str, &str)> = overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

        let project_dir = std::env::current_dir().context("reading current directory")?;
        let paths = paths::discover_paths(Some(&project_dir), cli.config.as_deref().map(Path::new));
        let resolved = load_all(&paths, &pairs).context("loading configuration")?;

        Self::from_resolved(resolved)
    }

    pub fn from_resolved(resolved: Resolved) -> Result<Self> {
        Ok(Self {
            general: resolved.section("general")?,
            provider: resolved.section("provider")?,
            team: resolved.section("team")?,
            reports: resolved.section("reports")?,
            resolved,
        })
    }

    /// Window length for commands that take one
    pub fn days(&self) -> u32 {
        self.general.time_range_days()
    }

    /// HTTP client for the configured provider; fails without credentials
    pub fn client(&self) -> Result<ProviderClient> {
        let settings = ProviderSettings::from_config(&self.provider)
            .context("provider settings are incomplete (see `gitpulse config show provider`)")?;
        Ok(ProviderClient::connect(&settings)?)
    }
}
