//! The poller loop: one task per (site, monitor) pair.

use crate::error::FetchError;
use crate::feed::ProductsWrapper;
use std::collections::HashSet;
use std::time::Duration;
use stockwatch_dispatch::DispatchHandle;
use stockwatch_notify::Job;
use stockwatch_shutdown::ShutdownSignal;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One watched variant, as it appears in config.
#[derive(Debug, Clone)]
pub struct ProductId {
    pub id: i64,
    pub label: String,
}

/// Everything a poller needs to know about the (site, monitor) pair it
/// watches, independent of how the engine loaded its configuration.
#[derive(Debug, Clone)]
pub struct MonitorSpec {
    pub site_name: String,
    pub site_url: String,
    pub monitor_name: String,
    pub endpoint_url: String,
    pub product_ids: Vec<ProductId>,
}

/// Drives one (site, monitor) poll loop: fetch, match, dedup, submit.
pub struct Poller {
    spec: MonitorSpec,
    poll_interval: Duration,
    retry_interval: Duration,
    max_retries: u32,
    dispatch: DispatchHandle,
    client: reqwest::Client,
    watchlist: HashSet<i64>,
    seen: HashSet<i64>,
}

impl Poller {
    /// Builds a poller. `max_retries` and `poll_interval`/`retry_interval`
    /// come from the global config; `spec` identifies this (site, monitor)
    /// pair and its watchlist.
    pub fn new(
        spec: MonitorSpec,
        poll_interval: Duration,
        retry_interval: Duration,
        max_retries: u32,
        dispatch: DispatchHandle,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("reqwest client with a fixed timeout always builds");

        let watchlist = spec.product_ids.iter().map(|p| p.id).collect();

        Self {
            spec,
            poll_interval,
            retry_interval,
            max_retries,
            dispatch,
            client,
            watchlist,
            seen: HashSet::new(),
        }
    }

    async fn fetch_once(&self) -> Result<ProductsWrapper, FetchError> {
        let url = self.spec.endpoint_url.clone();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        response
            .json::<ProductsWrapper>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }

    async fn fetch_with_retry(&self) -> Option<ProductsWrapper> {
        let mut last_err = None;

        for attempt in 0..self.max_retries {
            match self.fetch_once().await {
                Ok(wrapper) => {
                    tracing::debug!(
                        site = %self.spec.site_name,
                        monitor = %self.spec.monitor_name,
                        products = wrapper.products.len(),
                        attempt,
                        "fetched feed"
                    );
                    return Some(wrapper);
                }
                Err(err) => {
                    tracing::debug!(
                        site = %self.spec.site_name,
                        monitor = %self.spec.monitor_name,
                        attempt,
                        error = %err,
                        "fetch attempt failed"
                    );
                    last_err = Some(err);
                    if attempt + 1 < self.max_retries {
                        tokio::time::sleep(self.retry_interval).await;
                    }
                }
            }
        }

        tracing::warn!(
            site = %self.spec.site_name,
            monitor = %self.spec.monitor_name,
            max_retries = self.max_retries,
            error = ?last_err,
            "failed to fetch feed after exhausting retries; skipping this cycle"
        );
        None
    }

    /// One fetch-match-submit cycle. Emits no Jobs if every fetch attempt
    /// fails.
    async fn poll_cycle(&mut self) {
        let Some(wrapper) = self.fetch_with_retry().await else {
            return;
        };

        for product in &wrapper.products {
            for variant in &product.variants {
                let in_watchlist = self.watchlist.contains(&variant.id);

                if in_watchlist {
                    tracing::debug!(
                        site = %self.spec.site_name,
                        monitor = %self.spec.monitor_name,
                        variant_id = variant.id,
                        variant_title = %variant.title,
                        "matched watched variant"
                    );
                }

                if in_watchlist && variant.available && !self.seen.contains(&variant.id) {
                    self.seen.insert(variant.id);

                    let image_url = variant
                        .featured_image
                        .as_ref()
                        .map(|img| img.src.clone())
                        .unwrap_or_default();

                    tracing::info!(
                        site = %self.spec.site_name,
                        monitor = %self.spec.monitor_name,
                        variant_id = variant.id,
                        "match found, submitting job"
                    );

                    self.dispatch.submit(Job::new(
                        self.spec.site_url.clone(),
                        self.spec.monitor_name.clone(),
                        product.title.clone(),
                        variant.title.clone(),
                        variant.id.to_string(),
                        image_url,
                        variant.price.clone(),
                    ));
                }
            }
        }
    }

    /// Runs one cycle immediately, then every `poll_interval` until
    /// `shutdown` trips.
    pub async fn run(mut self, shutdown: ShutdownSignal) {
        self.poll_cycle().await;

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await; // consume the immediate first tick; poll_cycle above already ran it

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    tracing::debug!(
                        site = %self.spec.site_name,
                        monitor = %self.spec.monitor_name,
                        "poller received shutdown signal"
                    );
                    return;
                }
                _ = ticker.tick() => {
                    self.poll_cycle().await;
                }
            }
        }
    }
}
