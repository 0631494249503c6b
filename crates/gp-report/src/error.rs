// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::path::PathBuf;

use gp_provider_client::ProviderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to collect activity: {0}")]
    Provider(#[from] ProviderError),

    #[error("unknown team member '{0}'")]
    UnknownMember(String),

    #[error("invalid report template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("failed to render report: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<handlebars::TemplateError> for ReportError {
    fn from(err: handlebars::TemplateError) -> Self {
        ReportError::Template(Box::new(err))
    }
}
