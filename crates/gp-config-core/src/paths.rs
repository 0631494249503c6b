// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration file discovery

use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = "gitpulse.toml";

#[derive(Debug, Clone)]
pub struct Paths {
    pub user: PathBuf,
    pub project: Option<PathBuf>,
    pub cli_config: Option<PathBuf>,
}

/// Discover configuration paths.
///
/// `project_dir` is usually the current directory; `cli_config` is the file
/// named with `--config`.
pub fn discover_paths(project_dir: Option<&Path>, cli_config: Option<&Path>) -> Paths {
    Paths {
        user: user_config_path(),
        project: project_dir.map(|dir| dir.join(PROJECT_CONFIG_FILE)),
        cli_config: cli_config.map(Path::to_path_buf),
    }
}

/// `$GITPULSE_HOME/config.toml`, else `<config dir>/gitpulse/config.toml`
pub fn user_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("GITPULSE_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("gitpulse")
        .join("config.toml")
}
