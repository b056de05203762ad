//! Connectivity checks used by the availability provider

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::{ClientContext, ME_PATH};

/// Answers whether the backend is currently reachable
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn check(&self) -> bool;
}

/// Probe that hits the current-user endpoint.
///
/// Any response below 500 counts as reachable: a 401 or 404 still means the
/// API answered.
pub struct HttpProbe {
    ctx: Arc<ClientContext>,
}

impl HttpProbe {
    pub fn new(ctx: Arc<ClientContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ConnectivityProbe for HttpProbe {
    async fn check(&self) -> bool {
        match self.ctx.get(ME_PATH).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_server_error() {
                    log::warn!("Connectivity check got {}", status);
                    false
                } else {
                    true
                }
            }
            Err(e) => {
                log::warn!("Connectivity check to {} failed: {}", self.ctx.base_url(), e);
                false
            }
        }
    }
}
