// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for provider access

use thiserror::Error;

use crate::window::WindowError;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// Non-2xx response other than 404
    #[error("provider returned HTTP {status} for {path}: {body}")]
    Api { status: u16, path: String, body: String },

    /// 404 response; nested operations treat this as "skip the item"
    #[error("not found: {path}")]
    NotFound { path: String, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    /// The response parsed as JSON but not in the expected shape
    #[error("unexpected response from {path}: {message}")]
    Shape { path: String, message: String },

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error("invalid provider settings: {0}")]
    Config(String),
}

impl ProviderError {
    /// HTTP status carried by the error, if the provider answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            ProviderError::NotFound { .. } => Some(404),
            ProviderError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound { .. })
    }

    pub(crate) fn from_status(status: u16, path: &str, body: String) -> Self {
        if status == 404 {
            ProviderError::NotFound {
                path: path.to_string(),
                body,
            }
        } else {
            ProviderError::Api {
                status,
                path: path.to_string(),
                body,
            }
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[gp_test_utils::logged_test]
    fn status_mapping() {
        let not_found = ProviderError::from_status(404, "/repositories/7", "{}".into());
        assert!(not_found.is_not_found());
        assert_eq!(not_found.status(), Some(404));

        let server = ProviderError::from_status(503, "/repositories", "busy".into());
        assert!(!server.is_not_found());
        assert_eq!(server.status(), Some(503));
        assert!(server.to_string().contains("HTTP 503"));

        let config = ProviderError::Config("missing organization".into());
        assert_eq!(config.status(), None);
    }
}
