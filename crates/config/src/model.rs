//! Config tree. Field names match the original YAML keys so existing
//! config files parse unchanged.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductId {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub endpoint_url: String,
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifierConfig {
    pub webhook_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    pub name: String,
    #[serde(rename = "site_url")]
    pub url: String,
    #[serde(default)]
    pub monitors: Vec<MonitorConfig>,
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(with = "humantime_serde")]
    pub global_poll_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub global_retry_interval: Duration,
    pub global_max_retries: u32,
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}
