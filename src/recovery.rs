//! Recovery banner shown while the API is unreachable

use std::sync::Arc;

use colored::Colorize;

use crate::availability::{ApiAvailabilityStatus, AvailabilityActions};
use crate::cache::CacheInvalidator;

/// Controls offered by the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerAction {
    /// Drop cached responses and re-check connectivity
    Retry,
    /// Hide the banner until the next failure
    Dismiss,
}

/// Banner that surfaces an unreachable API and wires its two controls.
///
/// Holds no state of its own: every click performs its full action, however
/// many times it is clicked.
pub struct RecoveryBanner<A: ?Sized, I: ?Sized> {
    actions: Arc<A>,
    invalidator: Arc<I>,
}

impl<A, I> RecoveryBanner<A, I>
where
    A: AvailabilityActions + ?Sized,
    I: CacheInvalidator + ?Sized,
{
    pub fn new(actions: Arc<A>, invalidator: Arc<I>) -> Self {
        Self {
            actions,
            invalidator,
        }
    }

    /// Banner text, or `None` when the API is available.
    pub fn render(&self, status: &ApiAvailabilityStatus) -> Option<String> {
        if !status.unavailable {
            return None;
        }

        Some(format!(
            "{} {}\n  {} {}   {} {}",
            "⚠".yellow(),
            "The API is currently unavailable.".bold(),
            "[r]".cyan(),
            "Retry",
            "[d]".cyan(),
            "Dismiss"
        ))
    }

    /// Handle a click. Returns the connectivity outcome for `Retry`.
    pub async fn click(&self, action: BannerAction) -> Option<bool> {
        match action {
            BannerAction::Retry => {
                self.invalidator.invalidate_all();
                Some(self.actions.retry().await)
            }
            BannerAction::Dismiss => {
                self.actions.dismiss();
                None
            }
        }
    }
}
