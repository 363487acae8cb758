//! Authenticated HTTP client for OpenEdX platforms
//!
//! Wraps a cookie-bearing `reqwest` client with the header set the
//! platform expects and the CSRF/login handshake. Page fetches are a
//! single GET each: no retry logic, callers decide whether to recover.

use std::time::Duration;

use log::debug;
use reqwest::header::{ACCEPT, HeaderMap, REFERER};
use serde::Deserialize;

use crate::error::{EdxError, Result};
use crate::platform::Platform;

const USER_AGENT: &str = "edx-downloader/0.1";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Login endpoint response body
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    value: Option<String>,
}

/// HTTP client bound to one platform deployment
///
/// Holds the immutable default header map shared by every request; the
/// CSRF token obtained during authentication is attached per request.
pub struct EdxClient {
    client: reqwest::Client,
    platform: Platform,
    csrf_token: String,
}

impl EdxClient {
    /// Create a new client with default configuration
    pub fn new(platform: Platform) -> Result<Self> {
        Self::with_config(platform, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(platform: Platform, config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, "application/json, text/javascript, */*; q=0.01".parse().unwrap());
        if let Ok(referer) = platform.login_url().parse() {
            headers.insert(REFERER, referer);
        }
        headers.insert("X-Requested-With", "XMLHttpRequest".parse().unwrap());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(EdxError::Network)?;

        Ok(Self {
            client,
            platform,
            csrf_token: String::new(),
        })
    }

    /// The platform this client is bound to
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Acquire the CSRF token from the login endpoint's cookies
    ///
    /// # Returns
    /// The token value, or the empty string when the cookie is absent
    /// (not an error; the platform simply issues no token then).
    pub async fn fetch_csrf_token(&mut self) -> Result<String> {
        let response = self
            .client
            .get(self.platform.login_url())
            .send()
            .await
            .map_err(EdxError::Network)?;

        let token = response
            .cookies()
            .find(|cookie| cookie.name() == "csrftoken")
            .map(|cookie| cookie.value().to_string())
            .unwrap_or_default();

        self.csrf_token = token.clone();
        Ok(token)
    }

    /// Log in with the given credentials
    ///
    /// Acquires a CSRF token first, then posts the login form. The
    /// session cookie lives in the client's cookie store afterwards.
    ///
    /// # Errors
    /// - `Network` on connection or HTTP failure
    /// - `LoginFailed` when the platform rejects the credentials,
    ///   carrying the server-provided message when there is one
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        self.fetch_csrf_token().await?;

        let response = self
            .client
            .post(self.platform.login_url())
            .header("X-CSRFToken", &self.csrf_token)
            .form(&[("email", email), ("password", password), ("remember", "false")])
            .send()
            .await
            .map_err(EdxError::Network)?;

        let body: LoginResponse = response.json().await.map_err(EdxError::Network)?;
        if body.success {
            Ok(())
        } else {
            Err(EdxError::LoginFailed(
                body.value.unwrap_or_else(|| "Wrong email or password.".to_string()),
            ))
        }
    }

    /// Fetch a page and return its decoded body text
    ///
    /// One GET, no retries. The body is decoded using the charset
    /// declared in the response's Content-Type, falling back to UTF-8
    /// when absent (`reqwest::Response::text` semantics).
    ///
    /// # Errors
    /// `Network` on connection failure or an HTTP error status.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        debug!("Fetching '{}'", url);

        let response = self
            .client
            .get(url)
            .header("X-CSRFToken", &self.csrf_token)
            .send()
            .await
            .map_err(EdxError::Network)?
            .error_for_status()
            .map_err(EdxError::Network)?;

        response.text().await.map_err(EdxError::Network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_creation() {
        let client = EdxClient::new(Platform::edx());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig { timeout_secs: 60 };
        let client = EdxClient::with_config(Platform::stanford(), config);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().platform(), &Platform::stanford());
    }

    #[test]
    fn test_login_response_deserialization() {
        let body: LoginResponse =
            serde_json::from_str(r#"{"success":false,"value":"Email or password is incorrect."}"#)
                .unwrap();
        assert!(!body.success);
        assert_eq!(body.value.as_deref(), Some("Email or password is incorrect."));
    }

    #[test]
    fn test_login_response_defaults() {
        let body: LoginResponse = serde_json::from_str("{}").unwrap();
        assert!(!body.success);
        assert_eq!(body.value, None);
    }
}
