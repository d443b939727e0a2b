//! Wires a loaded [`stockwatch_config::Config`] into running tasks: one
//! dispatcher per enabled site, one poller per enabled monitor, all
//! tracked in a `JoinSet` and supervised until root cancellation.

use stockwatch_config::Config;
use stockwatch_dispatch::Dispatcher;
use stockwatch_monitor::{MonitorSpec, Poller, ProductId};
use stockwatch_notify::DiscordNotifier;
use stockwatch_shutdown::ShutdownSignal;
use std::time::Duration;
use tokio::task::JoinSet;

/// Discord's rate limit for incoming webhooks, and the window it applies
/// over. A production deployment would make this configurable per site;
/// the core fixes it, per the reference notifier's ecosystem.
const RATE_LIMIT: usize = 30;
const RATE_WINDOW: Duration = Duration::from_secs(60);

/// Starts every enabled site's dispatcher and every enabled monitor's
/// poller, then waits for `shutdown` to trip before returning. Also
/// installs a `ctrl_c` listener that trips `shutdown` itself, so callers
/// may pass a fresh, untripped signal and simply await this function.
pub async fn run(cfg: Config, shutdown: ShutdownSignal) {
    tracing::info!("starting monitors");

    let mut tasks = JoinSet::new();

    {
        let shutdown = shutdown.clone();
        tasks.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("received ctrl-c, shutting down");
                shutdown.trigger();
            }
        });
    }

    for site in &cfg.sites {
        if !site.enabled {
            continue;
        }

        let notifier = DiscordNotifier::new(
            site.notifier.webhook_url.clone(),
            site.notifier.username.clone(),
            site.notifier.avatar_url.clone(),
        );
        let (dispatcher, handle) = Dispatcher::new(RATE_LIMIT, RATE_WINDOW, notifier);

        let dispatch_shutdown = shutdown.clone();
        tasks.spawn(dispatcher.run(dispatch_shutdown));

        for mon in &site.monitors {
            if !mon.enabled {
                continue;
            }

            tracing::info!(site = %site.name, monitor = %mon.name, "launching monitor");

            let spec = MonitorSpec {
                site_name: site.name.clone(),
                site_url: site.url.clone(),
                monitor_name: mon.name.clone(),
                endpoint_url: mon.endpoint_url.clone(),
                product_ids: mon
                    .product_ids
                    .iter()
                    .map(|p| ProductId { id: p.id, label: p.label.clone() })
                    .collect(),
            };

            let poller = Poller::new(spec, cfg.global_poll_interval, cfg.global_retry_interval, cfg.global_max_retries, handle.clone());

            let poller_shutdown = shutdown.clone();
            tasks.spawn(poller.run(poller_shutdown));
        }
    }

    shutdown.cancelled().await;

    // Dispatchers and pollers each select on `shutdown` and return on
    // their own; the ctrl-c listener task above never resolves without an
    // actual signal. Abort whatever is still running rather than waiting
    // on it; no drain is required on shutdown.
    tasks.abort_all();
    while let Some(result) = tasks.join_next().await {
        if let Err(err) = result {
            if err.is_panic() {
                tracing::warn!(error = %err, "a task panicked during shutdown");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockwatch_config::{MonitorConfig, NotifierConfig, ProductId as ConfigProductId, SiteConfig};

    fn cfg_with_one_disabled_site() -> Config {
        Config {
            global_poll_interval: Duration::from_secs(3600),
            global_retry_interval: Duration::from_secs(1),
            global_max_retries: 1,
            sites: vec![SiteConfig {
                name: "acme".into(),
                url: "https://acme.example".into(),
                enabled: false,
                notifier: NotifierConfig {
                    webhook_url: "https://discord.example/hook".into(),
                    username: String::new(),
                    avatar_url: String::new(),
                },
                monitors: vec![MonitorConfig {
                    name: "widgets".into(),
                    kind: "shopify".into(),
                    endpoint_url: "https://acme.example/products.json".into(),
                    enabled: true,
                    product_ids: vec![ConfigProductId { id: 1, label: "widget".into() }],
                }],
            }],
        }
    }

    #[tokio::test]
    async fn run_returns_promptly_when_no_site_is_enabled() {
        let shutdown = ShutdownSignal::new();
        let trigger = shutdown.clone();

        let task = tokio::spawn(run(cfg_with_one_disabled_site(), shutdown));
        trigger.trigger();

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("run should return promptly once shutdown is triggered")
            .unwrap();
    }
}
