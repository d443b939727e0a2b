//! A single hierarchical cancellation signal, cloned into every
//! dispatcher and poller task.
//!
//! Tripping any clone marks the system as shutting down and wakes every
//! task currently waiting on [`ShutdownSignal::cancelled`]. Tripping more
//! than once is a no-op: idempotence is tracked with an `AtomicBool`,
//! and waiters are woken through a `Notify`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

struct Inner {
    tripped: AtomicBool,
    notify: Notify,
}

/// Cloneable handle to the root cancellation signal.
#[derive(Clone)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Creates a fresh, untripped signal.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                tripped: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// Trips the signal. Idempotent: only the first call has any effect.
    pub fn trigger(&self) {
        if !self.inner.tripped.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    /// `true` once [`ShutdownSignal::trigger`] has been called on any
    /// clone of this signal.
    pub fn is_triggered(&self) -> bool {
        self.inner.tripped.load(Ordering::SeqCst)
    }

    /// Resolves once the signal has been tripped. Safe to await
    /// repeatedly and from any number of clones concurrently; a signal
    /// tripped before this call still resolves immediately.
    pub async fn cancelled(&self) {
        if self.is_triggered() {
            return;
        }
        // Notify::notified() must be constructed before re-checking the
        // flag to avoid missing a trigger that races between the check
        // above and registering as a waiter.
        let notified = self.inner.notify.notified();
        if self.is_triggered() {
            return;
        }
        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancelled_resolves_after_trigger() {
        let signal = ShutdownSignal::new();
        let waiter = signal.clone();
        let handle = tokio::spawn(async move {
            waiter.cancelled().await;
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        signal.trigger();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("cancelled() should resolve promptly after trigger")
            .unwrap();
    }

    #[tokio::test]
    async fn cancelled_resolves_immediately_if_already_triggered() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        tokio::time::timeout(Duration::from_millis(50), signal.cancelled())
            .await
            .expect("already-triggered signal should not block");
    }

    #[tokio::test]
    async fn trigger_is_idempotent() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.trigger();
        assert!(signal.is_triggered());
    }

    #[test]
    fn is_triggered_false_before_any_trigger() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_triggered());
    }
}
