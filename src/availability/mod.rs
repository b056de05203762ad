//! API availability signal
//!
//! The [`AvailabilityProvider`] owns the only writable copy of the backend's
//! reachability state and publishes it over a `tokio::sync::watch` channel.
//! Observers hold an [`AvailabilitySignal`], which can read and wait for
//! changes but never write. Writes happen through three entry points:
//!
//! - [`AvailabilityProvider::report_failure`], called by request paths that
//!   hit an outage (the only way into the unavailable state)
//! - [`AvailabilityActions::retry`], which re-checks connectivity and is the
//!   only way back to available
//! - [`AvailabilityActions::dismiss`], which hides the banner without touching
//!   connectivity truth

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{Mutex, watch};

pub mod probe;

pub use probe::{ConnectivityProbe, HttpProbe};

/// Backend reachability as tracked by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Availability {
    /// Backend answered the last check
    Available,

    /// Backend is unreachable; `dismissed` hides the banner until the next failure
    Unavailable { dismissed: bool },
}

impl Availability {
    /// Snapshot consumed by the recovery banner
    pub fn status(&self) -> ApiAvailabilityStatus {
        ApiAvailabilityStatus {
            unavailable: matches!(self, Availability::Unavailable { dismissed: false }),
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Unavailable { dismissed: false } => write!(f, "unavailable"),
            Availability::Unavailable { dismissed: true } => write!(f, "unavailable (dismissed)"),
        }
    }
}

/// Visible availability flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiAvailabilityStatus {
    /// True when the banner should be shown
    pub unavailable: bool,
}

/// User-triggered actions supplied alongside the availability flag.
#[async_trait]
pub trait AvailabilityActions: Send + Sync {
    /// Re-check connectivity. Returns whether the backend is reachable.
    async fn retry(&self) -> bool;

    /// Hide the banner until the next reported failure
    fn dismiss(&self);
}

/// Single writable owner of the availability state
pub struct AvailabilityProvider {
    tx: watch::Sender<Availability>,
    probe: Arc<dyn ConnectivityProbe>,
    // Serializes connectivity checks so results are published in order
    retry_lock: Mutex<()>,
}

impl AvailabilityProvider {
    /// Create a provider that starts out available
    pub fn new(probe: Arc<dyn ConnectivityProbe>) -> Self {
        let (tx, _rx) = watch::channel(Availability::Available);
        Self {
            tx,
            probe,
            retry_lock: Mutex::new(()),
        }
    }

    /// Hand out a read-only subscription
    pub fn subscribe(&self) -> AvailabilitySignal {
        AvailabilitySignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Current state
    pub fn current(&self) -> Availability {
        *self.tx.borrow()
    }

    /// Record that a request failed because the backend could not be reached.
    ///
    /// Re-raises a dismissed banner.
    pub fn report_failure(&self) {
        self.publish(Availability::Unavailable { dismissed: false });
    }

    fn publish(&self, next: Availability) {
        self.tx.send_if_modified(|state| {
            if *state == next {
                return false;
            }
            log::info!("API availability: {} -> {}", state, next);
            *state = next;
            true
        });
    }
}

#[async_trait]
impl AvailabilityActions for AvailabilityProvider {
    async fn retry(&self) -> bool {
        let _guard = self.retry_lock.lock().await;

        let reachable = self.probe.check().await;
        log::debug!("Connectivity check: reachable={}", reachable);

        if reachable {
            self.publish(Availability::Available);
        } else {
            self.publish(Availability::Unavailable { dismissed: false });
        }
        reachable
    }

    fn dismiss(&self) {
        self.tx.send_if_modified(|state| match state {
            Availability::Unavailable { dismissed: false } => {
                log::debug!("API unavailable banner dismissed");
                *state = Availability::Unavailable { dismissed: true };
                true
            }
            _ => false,
        });
    }
}

/// Read/subscribe capability for the availability state
#[derive(Debug, Clone)]
pub struct AvailabilitySignal {
    rx: watch::Receiver<Availability>,
}

impl AvailabilitySignal {
    /// Visible flag right now
    pub fn status(&self) -> ApiAvailabilityStatus {
        self.rx.borrow().status()
    }

    /// Full state right now
    pub fn current(&self) -> Availability {
        *self.rx.borrow()
    }

    /// Wait for the next change. Returns `false` once the provider is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Probe with a switchable answer that counts its invocations
    pub(crate) struct FakeProbe {
        pub reachable: AtomicBool,
        pub checks: AtomicUsize,
        pub delay: Duration,
    }

    impl FakeProbe {
        pub(crate) fn new(reachable: bool) -> Self {
            Self {
                reachable: AtomicBool::new(reachable),
                checks: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl ConnectivityProbe for FakeProbe {
        async fn check(&self) -> bool {
            self.checks.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reachable.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_starts_available() {
        let provider = AvailabilityProvider::new(Arc::new(FakeProbe::new(true)));
        assert_eq!(provider.current(), Availability::Available);
        assert!(!provider.subscribe().status().unavailable);
    }

    #[test]
    fn test_report_failure_raises_flag() {
        let provider = AvailabilityProvider::new(Arc::new(FakeProbe::new(true)));
        let signal = provider.subscribe();

        provider.report_failure();

        assert!(signal.status().unavailable);
        assert_eq!(
            signal.current(),
            Availability::Unavailable { dismissed: false }
        );
    }

    #[test]
    fn test_report_failure_without_subscribers() {
        let provider = AvailabilityProvider::new(Arc::new(FakeProbe::new(true)));
        provider.report_failure();
        assert_eq!(
            provider.current(),
            Availability::Unavailable { dismissed: false }
        );
    }

    #[test]
    fn test_dismiss_hides_but_keeps_unavailable() {
        let provider = AvailabilityProvider::new(Arc::new(FakeProbe::new(false)));
        let signal = provider.subscribe();

        provider.report_failure();
        provider.dismiss();

        assert!(!signal.status().unavailable);
        assert_eq!(signal.current(), Availability::Unavailable { dismissed: true });
    }

    #[test]
    fn test_dismiss_when_available_is_noop() {
        let provider = AvailabilityProvider::new(Arc::new(FakeProbe::new(true)));
        provider.dismiss();
        assert_eq!(provider.current(), Availability::Available);
    }

    #[test]
    fn test_next_failure_reraises_dismissed_banner() {
        let provider = AvailabilityProvider::new(Arc::new(FakeProbe::new(false)));
        provider.report_failure();
        provider.dismiss();
        assert!(!provider.current().status().unavailable);

        provider.report_failure();
        assert!(provider.current().status().unavailable);
    }

    #[tokio::test]
    async fn test_retry_success_restores_available() {
        let probe = Arc::new(FakeProbe::new(true));
        let provider = AvailabilityProvider::new(probe.clone());
        provider.report_failure();

        assert!(provider.retry().await);
        assert_eq!(provider.current(), Availability::Available);
        assert_eq!(probe.checks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_failure_keeps_banner_visible() {
        let probe = Arc::new(FakeProbe::new(false));
        let provider = AvailabilityProvider::new(probe.clone());
        provider.report_failure();
        provider.dismiss();

        assert!(!provider.retry().await);
        assert!(provider.current().status().unavailable);
    }

    #[tokio::test]
    async fn test_repeated_retries_each_check() {
        let probe = Arc::new(FakeProbe::new(false));
        let provider = AvailabilityProvider::new(probe.clone());
        provider.report_failure();

        for _ in 0..3 {
            provider.retry().await;
        }
        assert_eq!(probe.checks.load(Ordering::SeqCst), 3);
        assert!(provider.current().status().unavailable);
    }

    #[tokio::test]
    async fn test_concurrent_retries_are_serialized() {
        let probe = Arc::new(FakeProbe {
            delay: Duration::from_millis(20),
            ..FakeProbe::new(true)
        });
        let provider = Arc::new(AvailabilityProvider::new(probe.clone()));
        provider.report_failure();

        let (a, b, c) = tokio::join!(provider.retry(), provider.retry(), provider.retry());

        assert!(a && b && c);
        assert_eq!(probe.checks.load(Ordering::SeqCst), 3);
        assert_eq!(provider.current(), Availability::Available);
    }

    #[tokio::test]
    async fn test_signal_observes_changes() {
        let provider = AvailabilityProvider::new(Arc::new(FakeProbe::new(true)));
        let mut signal = provider.subscribe();

        provider.report_failure();
        assert!(signal.changed().await);
        assert!(signal.status().unavailable);

        provider.retry().await;
        assert!(signal.changed().await);
        assert!(!signal.status().unavailable);
    }

    #[tokio::test]
    async fn test_signal_ends_when_provider_dropped() {
        let provider = AvailabilityProvider::new(Arc::new(FakeProbe::new(true)));
        let mut signal = provider.subscribe();
        drop(provider);
        assert!(!signal.changed().await);
    }
}
