// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use gp_provider_client::{ProviderError, WindowError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("failed to serialize tool output: {0}")]
    Output(#[source] serde_json::Error),
}

impl ToolError {
    /// Short machine-readable kind for protocol responses
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::UnknownTool(_) => "unknown_tool",
            ToolError::InvalidArguments { .. } => "invalid_arguments",
            ToolError::Provider(ProviderError::Window(WindowError::OutOfRange { .. })) => "invalid_arguments",
            ToolError::Provider(err) if err.is_not_found() => "not_found",
            ToolError::Provider(_) => "provider_error",
            ToolError::Output(_) => "internal_error",
        }
    }
}
