//! Per-site dispatcher: a bounded job queue drained at a sliding-window
//! rate cap into a [`Notifier`].
//!
//! Producers (monitor pollers) only ever see a [`DispatchHandle`], a
//! cheap clone of an unbounded mailbox sender. The dispatch task itself
//! is the sole owner of both rings (the pending-job queue and the
//! rate-limit timestamp window); `submit` never touches either ring
//! directly, it hands the job to the owning task over a channel instead
//! of taking a lock.

mod metrics;

pub use metrics::DispatchMetrics;

use stockwatch_notify::{Job, Notifier};
use stockwatch_ring::RingBuffer;
use stockwatch_shutdown::ShutdownSignal;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

/// Dispatcher drives its loop on a fixed 100ms tick, independent of
/// notify latency.
const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Cheaply-cloneable handle producers use to submit jobs to one site's
/// dispatcher. Never blocks, never fails from the caller's perspective:
/// worst case the job is queued and later silently evicted under
/// sustained overload.
#[derive(Clone)]
pub struct DispatchHandle {
    sender: mpsc::UnboundedSender<Job>,
}

impl DispatchHandle {
    /// Enqueues `job` for dispatch. Overflow handling (LRU eviction of the
    /// oldest pending job) happens inside the dispatch task, not here.
    pub fn submit(&self, job: Job) {
        // Only fails if every Dispatcher has been dropped, which only
        // happens post-shutdown; there is nothing left to submit to.
        let _ = self.sender.send(job);
    }
}

/// Per-site dispatcher. Owns its rate window and pending queue outright;
/// nothing outside `run` ever touches them.
pub struct Dispatcher<N: Notifier> {
    rate_window: RingBuffer<Instant>,
    pending: RingBuffer<Job>,
    notifier: N,
    rate_limit: usize,
    window: Duration,
    inbox: mpsc::UnboundedReceiver<Job>,
    metrics: DispatchMetrics,
}

impl<N: Notifier> Dispatcher<N> {
    /// Constructs a dispatcher with rate limit `rate_limit` per `window`,
    /// delivering to `notifier`. Internal ring sizes are
    /// `next_power_of_two(rate_limit)` for both rings.
    ///
    /// # Panics
    ///
    /// Panics if `rate_limit` is zero or `window` is zero. These are
    /// programmer errors, not runtime conditions (see `RingBuffer`
    /// construction, which fails the same way for non-power-of-two
    /// capacities).
    pub fn new(rate_limit: usize, window: Duration, notifier: N) -> (Self, DispatchHandle) {
        assert!(rate_limit > 0, "rate_limit must be > 0");
        assert!(!window.is_zero(), "window must be > 0");

        let (sender, inbox) = mpsc::unbounded_channel();

        let dispatcher = Self {
            rate_window: RingBuffer::with_capacity_at_least(rate_limit),
            pending: RingBuffer::with_capacity_at_least(rate_limit),
            notifier,
            rate_limit,
            window,
            inbox,
            metrics: DispatchMetrics::default(),
        };

        (dispatcher, DispatchHandle { sender })
    }

    /// Current dispatcher counters, for diagnostics/tests.
    pub fn metrics(&self) -> DispatchMetrics {
        self.metrics
    }

    fn enqueue(&mut self, job: Job) {
        if self.pending.is_full() {
            self.pending.pop_oldest();
            self.metrics.evicted += 1;
        }
        self.pending.push(job);
        self.metrics.submitted += 1;
    }

    async fn dispatch_tick(&mut self) {
        let now = Instant::now();

        // If the window exceeds process uptime nothing in the ring can
        // be older than `now - window` yet; skip pruning rather than
        // underflow the subtraction.
        if let Some(threshold) = now.checked_sub(self.window) {
            self.rate_window.prune_before(&threshold, |a, b| a < b);
        }

        if self.pending.is_empty() || self.rate_window.len() >= self.rate_limit {
            return;
        }

        let Some(job) = self.pending.pop_oldest() else {
            return;
        };

        self.notifier.notify(&job).await;
        self.rate_window.push(now);
        self.metrics.dispatched += 1;
    }

    /// Drives the dispatch loop until `shutdown` is tripped.
    ///
    /// Not reentrant: call once per dispatcher. On cancellation the loop
    /// returns promptly; an in-flight `notify` call is allowed to
    /// complete, but pending jobs are not drained.
    pub async fn run(mut self, shutdown: ShutdownSignal) {
        let mut tick = tokio::time::interval(TICK_PERIOD);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    tracing::debug!(notifier = self.notifier.name(), "dispatcher received shutdown signal");
                    return;
                }
                maybe_job = self.inbox.recv() => {
                    match maybe_job {
                        Some(job) => {
                            self.enqueue(job);
                            // Drain any other submissions already buffered in
                            // the mailbox without waiting, so a burst that
                            // arrived between ticks is fully reflected in the
                            // pending ring before the next eviction/dispatch
                            // decision.
                            while let Ok(job) = self.inbox.try_recv() {
                                self.enqueue(job);
                            }
                        }
                        None => {
                            tracing::debug!(notifier = self.notifier.name(), "dispatcher inbox closed");
                            return;
                        }
                    }
                }
                _ = tick.tick() => {
                    self.dispatch_tick().await;
                }
            }
        }
    }
}
