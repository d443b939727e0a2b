use crate::job::Job;
use std::future::Future;
use std::pin::Pin;

/// Minimal fire-and-forget sink for one [`Job`] at a time.
///
/// Implementations MAY block and MAY perform network I/O. They MUST NOT
/// mutate the job. The dispatcher does not prescribe retry or failure
/// reporting beyond what an implementation chooses to log internally:
/// once handed to `notify`, the job is considered delivered regardless of
/// outcome.
///
/// Uses a native `async fn` in trait rather than `#[async_trait]`; see
/// [`NotifierBoxed`] for the object-safe sibling used wherever dynamic
/// dispatch is needed (one dispatcher per site, each wired to a
/// differently-configured notifier).
pub trait Notifier: Send + Sync {
    /// Delivers one job. Never returns an error to the caller; failures
    /// are an implementation concern, logged rather than propagated.
    fn notify(&self, job: &Job) -> impl Future<Output = ()> + Send;

    /// Name used in logs to identify which notifier handled a job.
    fn name(&self) -> &str;
}

/// Object-safe version of [`Notifier`] for dynamic dispatch (`Arc<dyn
/// NotifierBoxed>`), since the engine wires one dispatcher per site and
/// each site's notifier is a distinct concrete type only known at
/// config-load time.
pub trait NotifierBoxed: Send + Sync {
    /// Boxed-future version of [`Notifier::notify`].
    fn notify_boxed<'a>(&'a self, job: &'a Job) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

    /// See [`Notifier::name`].
    fn name(&self) -> &str;
}

impl<T: Notifier> NotifierBoxed for T {
    fn notify_boxed<'a>(&'a self, job: &'a Job) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(self.notify(job))
    }

    fn name(&self) -> &str {
        Notifier::name(self)
    }
}

/// Discards every job. Useful for dry runs and benchmarking the dispatch
/// path without touching the network.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    async fn notify(&self, _job: &Job) {}

    fn name(&self) -> &str {
        "null"
    }
}

/// Records every job it receives, for test assertions.
#[cfg(any(test, feature = "test-util"))]
pub struct RecordingNotifier {
    received: std::sync::Mutex<Vec<Job>>,
}

#[cfg(any(test, feature = "test-util"))]
impl Default for RecordingNotifier {
    fn default() -> Self {
        Self {
            received: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(any(test, feature = "test-util"))]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<Job> {
        self.received.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl Notifier for RecordingNotifier {
    async fn notify(&self, job: &Job) {
        self.received.lock().unwrap().push(job.clone());
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn null_notifier_accepts_anything() {
        let n = NullNotifier;
        let job = Job::new("https://site.example", "m", "p", "v", "1", "", "9.99");
        n.notify(&job).await;
    }

    #[tokio::test]
    async fn recording_notifier_stores_jobs_in_order() {
        let n = RecordingNotifier::new();
        for i in 0..3 {
            let job = Job::new(
                "https://site.example",
                "m",
                "p",
                "v",
                i.to_string(),
                "",
                "9.99",
            );
            n.notify(&job).await;
        }
        assert_eq!(n.count(), 3);
        let received = n.received();
        assert_eq!(received[0].variant_id, "0");
        assert_eq!(received[2].variant_id, "2");
    }
}
