// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Static token authentication

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{ProviderError, ProviderResult};

pub const DEFAULT_TOKEN_HEADER: &str = gp_config_types::provider::DEFAULT_TOKEN_HEADER;

/// Access token plus the header it is sent in.
///
/// `Debug` never prints the token.
#[derive(Clone)]
pub struct TokenAuth {
    header: String,
    token: String,
}

impl TokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_header(DEFAULT_TOKEN_HEADER, token)
    }

    pub fn with_header(header: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            token: token.into(),
        }
    }

    pub fn header_name(&self) -> &str {
        &self.header
    }

    pub fn headers(&self) -> ProviderResult<HeaderMap> {
        let name = HeaderName::from_bytes(self.header.as_bytes())
            .map_err(|e| ProviderError::Config(format!("invalid token header name: {}", e)))?;
        let mut value = HeaderValue::from_str(&self.token)
            .map_err(|_| ProviderError::Config("access token is not a valid header value".into()))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(name, value);
        Ok(headers)
    }
}

impl std::fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuth")
            .field("header", &self.header)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[gp_test_utils::logged_test]
    fn debug_output_hides_token() {
        let auth = TokenAuth::new("pt-very-secret");
        let printed = format!("{:?}", auth);
        assert!(printed.contains("x-yunxiao-token"));
        assert!(!printed.contains("very-secret"));
    }

    #[gp_test_utils::logged_test]
    fn headers_carry_token() {
        let auth = TokenAuth::with_header("private-token", "abc123");
        let headers = auth.headers().unwrap();
        assert_eq!(headers.get("private-token").unwrap(), "abc123");
        assert!(headers.get("private-token").unwrap().is_sensitive());
    }

    #[gp_test_utils::logged_test]
    fn bad_header_name_is_a_config_error() {
        let auth = TokenAuth::with_header("bad header", "abc");
        assert!(matches!(auth.headers(), Err(ProviderError::Config(_))));
    }
}
