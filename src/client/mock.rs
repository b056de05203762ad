//! Mock account API client for testing
//!
//! Returns canned data without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::models::{AccountSettings, NotificationSettings, Theme, UserProfile};
use super::AccountApi;
use crate::error::{ApiError, Result};

/// Mock API client.
///
/// # Example
/// ```ignore
/// let mock = MockAccountClient::new()
///     .with_error(ApiError::Network("down".into()))
///     .await;
/// assert!(mock.get_profile().await.is_err());
/// ```
pub struct MockAccountClient {
    profile: Arc<Mutex<UserProfile>>,
    settings: Arc<Mutex<AccountSettings>>,
    /// Error to return - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_profile: usize,
    pub get_settings: usize,
}

impl Default for MockAccountClient {
    fn default() -> Self {
        Self {
            profile: Arc::new(Mutex::new(UserProfile {
                id: "user-1".to_string(),
                email: "ada@example.com".to_string(),
                name: Some("Ada Lovelace".to_string()),
                organization_id: Some(42),
            })),
            settings: Arc::new(Mutex::new(AccountSettings {
                display_name: Some("Ada".to_string()),
                locale: Some("en-GB".to_string()),
                timezone: Some("Europe/London".to_string()),
                theme: Theme::Dark,
                notifications: NotificationSettings {
                    email: true,
                    product_updates: false,
                    security_alerts: true,
                },
            })),
            error: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
        }
    }
}

impl MockAccountClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next call with `error`
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Snapshot of call counts
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    async fn take_error(&self) -> Result<()> {
        match self.error.lock().await.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AccountApi for MockAccountClient {
    async fn get_profile(&self) -> Result<UserProfile> {
        self.call_count.lock().await.get_profile += 1;
        self.take_error().await?;
        Ok(self.profile.lock().await.clone())
    }

    async fn get_settings(&self) -> Result<AccountSettings> {
        self.call_count.lock().await.get_settings += 1;
        self.take_error().await?;
        Ok(self.settings.lock().await.clone())
    }
}
