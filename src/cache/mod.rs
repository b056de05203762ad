//! Local cache for account API responses
//!
//! Entries are keyed per session scope (API host plus a credential
//! fingerprint), so a new token never reads another user's responses. The
//! whole cache is dropped when the user retries after an outage.

pub mod client;
pub mod key;
pub mod storage;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};

pub use client::CachedAccountClient;
pub use key::{cache_key, session_scope};
pub use storage::{CacheStorage, ScopeSummary};

/// Cache TTL per data type
pub struct CacheTtl;

impl CacheTtl {
    pub const PROFILE: Duration = Duration::from_secs(10 * 60); // 10 min
    pub const SETTINGS: Duration = Duration::from_secs(5 * 60); // 5 min
}

/// Something that can drop every cached request result
pub trait CacheInvalidator: Send + Sync {
    fn invalidate_all(&self);
}

/// Shared handle to the response cache.
///
/// Cloning shares the same storage. A disabled cache (`--no-cache`, or a
/// cache directory that cannot be opened) misses every lookup.
#[derive(Clone, Default)]
pub struct ResponseCache {
    storage: Option<Arc<Mutex<CacheStorage>>>,
}

impl ResponseCache {
    /// Open the default cache location, or a disabled cache
    pub fn open(enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }
        match CacheStorage::open() {
            Ok(storage) => Self::from_storage(storage),
            Err(e) => {
                log::warn!("Response cache unavailable: {}", e);
                Self::disabled()
            }
        }
    }

    #[cfg(test)]
    pub fn open_at(dir: &std::path::Path) -> Result<Self, crate::error::CacheError> {
        Ok(Self::from_storage(CacheStorage::open_at(dir)?))
    }

    pub fn disabled() -> Self {
        Self { storage: None }
    }

    fn from_storage(storage: CacheStorage) -> Self {
        Self {
            storage: Some(Arc::new(Mutex::new(storage))),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.storage.is_some()
    }

    /// Decode a cached value, treating any failure as a miss
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let storage = self.storage.as_ref()?;
        let guard = storage.lock().ok()?;
        guard
            .get(key)
            .ok()
            .flatten()
            .and_then(|body| serde_json::from_slice(&body).ok())
    }

    /// Store a value; failures only cost a future cache miss
    pub fn put<T: Serialize>(&self, key: &str, scope: &str, endpoint: &str, data: &T, ttl: Duration) {
        if let Some(ref storage) = self.storage
            && let Ok(guard) = storage.lock()
            && let Ok(body) = serde_json::to_vec(data)
            && let Err(e) = guard.put(key, scope, endpoint, &body, ttl)
        {
            log::warn!("Failed to cache {}: {}", endpoint, e);
        }
    }

    /// Drop the entries of one session; returns how many went
    pub fn invalidate_scope(&self, scope: &str) -> usize {
        let Some(ref storage) = self.storage else {
            return 0;
        };
        let Ok(guard) = storage.lock() else {
            return 0;
        };
        match guard.clear_scope(scope) {
            Ok(removed) => removed,
            Err(e) => {
                log::warn!("Failed to invalidate cached session: {}", e);
                0
            }
        }
    }
}

impl CacheInvalidator for ResponseCache {
    fn invalidate_all(&self) {
        let Some(ref storage) = self.storage else {
            return;
        };
        let Ok(guard) = storage.lock() else {
            return;
        };
        match guard.clear_all() {
            Ok(removed) => log::debug!("Invalidated {} cached responses", removed),
            Err(e) => log::warn!("Failed to invalidate cache: {}", e),
        }
    }
}
