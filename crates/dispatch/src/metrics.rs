/// Plain (non-atomic) dispatcher counters.
///
/// No `Arc`/atomics: exactly one task, the one running
/// [`crate::Dispatcher::run`], ever reads or writes these, so there is
/// nothing to synchronize.
#[derive(Debug, Default, Clone, Copy)]
pub struct DispatchMetrics {
    /// Jobs accepted via `submit` (before any eviction).
    pub submitted: u64,
    /// Jobs dropped because the pending ring was full at submit time.
    pub evicted: u64,
    /// Jobs successfully handed to the notifier.
    pub dispatched: u64,
}
