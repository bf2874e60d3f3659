//! Debounced infinite-scroll trigger
//!
//! Scroll triggers are modeled as a cancellable delayed action plus an
//! in-flight guard. Arming replaces (cancels) any pending action; a trigger
//! arriving while a load is already in flight is ignored outright. This is
//! the only place in the core with true cancellation semantics.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::defaults;

/// Coalesces infinite-scroll triggers into at most one pending load.
#[derive(Debug)]
pub struct ScrollDebouncer {
    delay: Duration,
    pending: Option<CancellationToken>,
    in_flight: bool,
}

impl ScrollDebouncer {
    /// Creates a debouncer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            in_flight: false,
        }
    }

    /// Returns the configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Registers a scroll trigger.
    ///
    /// Cancels any previously armed action and returns the token for the new
    /// one. Returns `None` while a load is in flight; such triggers are
    /// dropped, not queued.
    pub fn arm(&mut self) -> Option<CancellationToken> {
        if self.in_flight {
            return None;
        }
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        Some(token)
    }

    /// Waits out the debounce delay for an armed trigger.
    ///
    /// Returns `true` if the delay elapsed without the trigger being
    /// superseded and no load started in the meantime; the caller should then
    /// perform the load-more.
    pub async fn settle(&mut self, token: CancellationToken) -> bool {
        let delay = self.delay;
        tokio::select! {
            _ = token.cancelled() => false,
            _ = tokio::time::sleep(delay) => {
                if self.in_flight {
                    return false;
                }
                self.pending = None;
                true
            }
        }
    }

    /// Marks a load as started; triggers arriving until [`Self::load_ended`]
    /// are ignored.
    pub fn load_started(&mut self) {
        self.in_flight = true;
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    /// Marks the in-flight load as finished.
    pub fn load_ended(&mut self) {
        self.in_flight = false;
    }

    /// Returns `true` while a load is in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

impl Default for ScrollDebouncer {
    fn default() -> Self {
        Self::new(defaults::SCROLL_DEBOUNCE)
    }
}
