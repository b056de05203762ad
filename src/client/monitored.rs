//! Outage reporting for account API calls

use std::sync::Arc;

use async_trait::async_trait;

use super::{AccountApi, AccountSettings, UserProfile};
use crate::availability::AvailabilityProvider;
use crate::error::{Error, Result};

/// Wraps an [`AccountApi`] and flags the API unavailable when a call fails
/// with a transport error or a 5xx.
pub struct MonitoredClient<C: AccountApi> {
    inner: C,
    provider: Arc<AvailabilityProvider>,
}

impl<C: AccountApi> MonitoredClient<C> {
    pub fn new(inner: C, provider: Arc<AvailabilityProvider>) -> Self {
        Self { inner, provider }
    }

    fn observe<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(Error::Api(err)) = &result
            && err.is_outage()
        {
            self.provider.report_failure();
        }
        result
    }
}

#[async_trait]
impl<C: AccountApi> AccountApi for MonitoredClient<C> {
    async fn get_profile(&self) -> Result<UserProfile> {
        let result = self.inner.get_profile().await;
        self.observe(result)
    }

    async fn get_settings(&self) -> Result<AccountSettings> {
        let result = self.inner.get_settings().await;
        self.observe(result)
    }
}
