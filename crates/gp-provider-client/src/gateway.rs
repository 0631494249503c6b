// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Transport seam between the fetchers and the provider API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, Response};
use serde_json::Value;
use url::Url;

use crate::auth::TokenAuth;
use crate::error::{ProviderError, ProviderResult};

/// Query string as ordered key/value pairs
pub type Query = [(String, String)];

/// Authenticated access to one provider organization.
///
/// Paths are relative to the organization base URL (`/repositories`, ...).
/// Any non-2xx answer is an error; 404 maps to [`ProviderError::NotFound`].
/// Implementations never retry.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn request(&self, method: Method, path: &str, query: &Query) -> ProviderResult<Value>;

    async fn get(&self, path: &str, query: &Query) -> ProviderResult<Value> {
        self.request(Method::GET, path, query).await
    }
}

/// Production gateway over a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http_client: HttpClient,
    base_url: Url,
    auth: TokenAuth,
}

impl HttpGateway {
    pub fn new(base_url: Url, auth: TokenAuth, timeout: Duration) -> ProviderResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(concat!("gitpulse/", env!("CARGO_PKG_VERSION")))
            .default_headers(auth.headers()?)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            auth,
        })
    }

    pub fn from_url(base_url: &str, auth: TokenAuth, timeout: Duration) -> ProviderResult<Self> {
        let base_url = Url::parse(base_url)?;
        Self::new(base_url, auth, timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn auth(&self) -> &TokenAuth {
        &self.auth
    }

    fn url_for(&self, path: &str) -> ProviderResult<Url> {
        // `Url::join` would drop the organization prefix of the base path
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    async fn handle_response(&self, path: &str, response: Response) -> ProviderResult<Value> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(ProviderError::from);
        }
        Err(ProviderError::from_status(status.as_u16(), path, text))
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn request(&self, method: Method, path: &str, query: &Query) -> ProviderResult<Value> {
        let url = self.url_for(path)?;
        tracing::debug!(%method, path, ?query, "provider request");

        let response = self
            .http_client
            .request(method.clone(), url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status().as_u16();
        let result = self.handle_response(path, response).await;
        match &result {
            Ok(_) => tracing::debug!(%method, path, status, "provider response"),
            Err(err) => tracing::debug!(%method, path, status, error = %err, "provider request failed"),
        }
        result
    }
}
