// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Git provider connection settings

use serde::{Deserialize, Serialize};

pub const DEFAULT_DOMAIN: &str = "openapi-rdc.aliyuncs.com";
pub const DEFAULT_TOKEN_HEADER: &str = "x-yunxiao-token";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How far listing fetchers trust the server's sort order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, schemars::JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderPolicy {
    /// Stop at the first out-of-window item while the observed order holds
    #[default]
    TrustServer,
    /// Always read every page and filter locally
    FullScan,
}

#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema, Default, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProviderConfig {
    /// API host, without scheme
    pub domain: Option<String>,
    /// Full base URL; overrides `domain` when set
    pub base_url: Option<String>,
    /// Organization whose repositories are scanned
    pub organization_id: Option<String>,
    /// Static access token sent with every request
    pub access_token: Option<String>,
    /// Header carrying the access token
    pub token_header: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    pub order_policy: Option<OrderPolicy>,
}

impl ProviderConfig {
    /// Base URL of the organization-scoped API
    pub fn resolved_base_url(&self) -> Option<String> {
        if let Some(url) = &self.base_url {
            return Some(url.trim_end_matches('/').to_string());
        }
        let org = self.organization_id.as_deref()?;
        let domain = self.domain.as_deref().unwrap_or(DEFAULT_DOMAIN);
        Some(format!(
            "https://{}/oapi/v1/codeup/organizations/{}",
            domain.trim_end_matches('/'),
            org
        ))
    }

    pub fn token_header(&self) -> &str {
        self.token_header.as_deref().unwrap_or(DEFAULT_TOKEN_HEADER)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn order_policy(&self) -> OrderPolicy {
        self.order_policy.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[gp_test_utils::logged_test]
    fn base_url_from_domain_and_organization() {
        let config = ProviderConfig {
            organization_id: Some("org-42".into()),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_base_url().as_deref(),
            Some("https://openapi-rdc.aliyuncs.com/oapi/v1/codeup/organizations/org-42")
        );
        assert_eq!(config.token_header(), "x-yunxiao-token");
        assert_eq!(config.order_policy(), OrderPolicy::TrustServer);
    }

    #[gp_test_utils::logged_test]
    fn explicit_base_url_wins() {
        let config = ProviderConfig {
            base_url: Some("http://127.0.0.1:8080/api/".into()),
            organization_id: Some("ignored".into()),
            ..Default::default()
        };
        assert_eq!(config.resolved_base_url().as_deref(), Some("http://127.0.0.1:8080/api"));
    }

    #[gp_test_utils::logged_test]
    fn no_organization_means_no_url() {
        assert_eq!(ProviderConfig::default().resolved_base_url(), None);
    }

    #[gp_test_utils::logged_test]
    fn kebab_case_toml() {
        let config: ProviderConfig = toml::from_str(
            r#"
            organization-id = "org"
            access-token = "secret"
            order-policy = "full-scan"
            timeout-secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.order_policy(), OrderPolicy::FullScan);
        assert_eq!(config.timeout_secs(), 5);
    }
}
