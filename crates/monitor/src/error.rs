use thiserror::Error;

/// A single failed attempt to fetch and decode the upstream feed.
///
/// All three variants are retried identically within the `max_retries`
/// budget; the split exists purely so log lines say which stage failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error fetching {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("non-success status {status} fetching {url}")]
    Status { url: String, status: reqwest::StatusCode },

    #[error("failed to decode feed body from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}
