//! Command execution context
//!
//! Loads configuration once and wires the request context, response cache
//! and availability provider that commands share.

use std::sync::Arc;

use crate::availability::{AvailabilityProvider, HttpProbe};
use crate::cache::{CachedAccountClient, ResponseCache};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{AccountClient, ClientContext, MonitoredClient};
use crate::config::Config;
use crate::error::Result;
use crate::recovery::RecoveryBanner;

/// Account client stack used by commands: outage reporting over caching over HTTP
pub type CommandClient = MonitoredClient<CachedAccountClient<AccountClient>>;

/// Shared state for a single command run
pub struct CommandContext {
    /// Loaded configuration with CLI/env overrides applied
    pub config: Config,
    /// Request context (HTTP client, credentials, cookies)
    pub client_ctx: Arc<ClientContext>,
    /// Response cache (disabled with --no-cache)
    pub cache: ResponseCache,
    /// Owner of the availability state for this session
    pub provider: Arc<AvailabilityProvider>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config, apply overrides and build the shared collaborators.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?
            .with_overrides(opts.api_host_ref(), opts.token_ref());
        config.validate()?;

        let client_ctx = Arc::new(ClientContext::from_config(&config)?);
        let cache = ResponseCache::open(config.preferences.cache_enabled && !opts.no_cache);
        let probe = Arc::new(HttpProbe::new(client_ctx.clone()));
        let provider = Arc::new(AvailabilityProvider::new(probe));

        Ok(Self {
            config,
            client_ctx,
            cache,
            provider,
            format: opts.format,
        })
    }

    /// Account API client with caching and outage reporting
    pub fn account_client(&self) -> CommandClient {
        let http = AccountClient::new(self.client_ctx.clone());
        let cached = CachedAccountClient::new(http, self.cache.clone(), self.config.cache_scope());
        MonitoredClient::new(cached, self.provider.clone())
    }

    /// Uncached client with outage reporting, for polling
    pub fn live_client(&self) -> MonitoredClient<AccountClient> {
        MonitoredClient::new(
            AccountClient::new(self.client_ctx.clone()),
            self.provider.clone(),
        )
    }

    /// Recovery banner bound to this session's provider and cache
    pub fn banner(&self) -> RecoveryBanner<AvailabilityProvider, ResponseCache> {
        RecoveryBanner::new(self.provider.clone(), Arc::new(self.cache.clone()))
    }

    /// Print the banner to stderr if the API is marked unavailable
    pub fn show_banner(&self) {
        if let Some(text) = self.banner().render(&self.provider.current().status()) {
            eprintln!("{}", text);
        }
    }
}
