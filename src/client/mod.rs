//! Account API client
//!
//! [`ClientContext`] carries everything an outbound request needs: the HTTP
//! client, base URL, credential store and session cookies. Callers pass it
//! explicitly instead of reaching for process-wide state.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::cookie::Jar;

use crate::config::Config;
use crate::error::{ApiError, ConfigError, Result};

pub mod account;
pub mod credentials;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod monitored;

pub use account::AccountClient;
pub use credentials::{CredentialStore, StaticCredentials};
pub use models::{AccountSettings, UserProfile};
pub use monitored::MonitoredClient;

/// Path of the current-user endpoint, relative to the versioned base URL
pub const ME_PATH: &str = "/me";

/// Request timeout for account API calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Account API operations
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Fetch the signed-in user's profile
    async fn get_profile(&self) -> Result<UserProfile>;

    /// Fetch the signed-in user's account settings
    async fn get_settings(&self) -> Result<AccountSettings>;
}

/// Shared request context: HTTP client, base URL, credentials and cookies.
pub struct ClientContext {
    http: HttpClient,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl ClientContext {
    /// Create a context for `base_url` (e.g. `https://host/api/v1`).
    ///
    /// `session_cookie` is a `name=value` pair seeded into the cookie jar so
    /// that every request carries the session.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialStore>,
        session_cookie: Option<&str>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = session_cookie {
            let url = base_url
                .parse::<reqwest::Url>()
                .map_err(|e| ConfigError::Invalid(format!("Invalid base URL: {}", e)))?;
            jar.add_cookie_str(cookie, &url);
        }

        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .cookie_provider(jar)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Build a context from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = Arc::new(StaticCredentials::new(config.access_token.clone()));
        Self::new(
            config.api_base_url(),
            credentials,
            config.session_cookie.as_deref(),
        )
    }

    /// Versioned base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a GET request to `path` with JSON content type and, when a
    /// token is available, bearer authorization.
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .http
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        match self.credentials.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}
