//! Cached wrapper for the account API client

use async_trait::async_trait;

use crate::cache::{CacheTtl, ResponseCache, cache_key};
use crate::client::{AccountApi, AccountSettings, UserProfile};
use crate::error::Result;

/// Caching layer over any [`AccountApi`] implementation.
///
/// `scope` is the session scope from [`session_scope`](crate::cache::session_scope):
/// two sessions on the same host never read each other's entries.
pub struct CachedAccountClient<C: AccountApi> {
    inner: C,
    cache: ResponseCache,
    scope: String,
}

impl<C: AccountApi> CachedAccountClient<C> {
    pub fn new(inner: C, cache: ResponseCache, scope: impl Into<String>) -> Self {
        Self {
            inner,
            cache,
            scope: scope.into(),
        }
    }
}

#[async_trait]
impl<C: AccountApi> AccountApi for CachedAccountClient<C> {
    async fn get_profile(&self) -> Result<UserProfile> {
        let key = cache_key("get_profile", &self.scope);

        if let Some(cached) = self.cache.get(&key) {
            log::debug!("Cache hit: get_profile");
            return Ok(cached);
        }

        let result = self.inner.get_profile().await?;
        self.cache
            .put(&key, &self.scope, "get_profile", &result, CacheTtl::PROFILE);
        Ok(result)
    }

    async fn get_settings(&self) -> Result<AccountSettings> {
        let key = cache_key("get_settings", &self.scope);

        if let Some(cached) = self.cache.get(&key) {
            log::debug!("Cache hit: get_settings");
            return Ok(cached);
        }

        let result = self.inner.get_settings().await?;
        self.cache
            .put(&key, &self.scope, "get_settings", &result, CacheTtl::SETTINGS);
        Ok(result)
    }
}
