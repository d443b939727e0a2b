//! Reference [`Notifier`] implementation: formats a Discord message-embed
//! and POSTs it to a configured webhook URL.

use crate::job::Job;
use crate::notifier::Notifier;
use serde_json::json;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Discord's default embed accent color ("found it" green-ish, matching
/// the reference implementation).
const EMBED_COLOR: u64 = 16_777_214;

/// Posts a formatted message-embed to a Discord-compatible incoming
/// webhook for every job it receives.
pub struct DiscordNotifier {
    webhook_url: String,
    username: String,
    avatar_url: String,
    client: reqwest::Client,
}

impl DiscordNotifier {
    /// Builds a new Discord webhook notifier.
    pub fn new(webhook_url: impl Into<String>, username: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("reqwest client with a fixed timeout always builds");

        Self {
            webhook_url: webhook_url.into(),
            username: username.into(),
            avatar_url: avatar_url.into(),
            client,
        }
    }

    fn embed(&self, job: &Job) -> serde_json::Value {
        let mut embed = json!({
            "title": "Product Found",
            "url": format!("{}/cart/add?id={}", job.site_url, job.variant_id),
            "color": EMBED_COLOR,
            "fields": [
                { "name": "Price", "value": job.price },
                { "name": "Product", "value": job.product_title },
                { "name": "Variant", "value": job.variant_title },
                { "name": "ID", "value": job.variant_id },
            ],
            "footer": {
                "text": "stockwatch",
                "icon_url": self.avatar_url,
            },
            "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        });

        if !job.image_url.is_empty() {
            embed["image"] = json!({ "url": job.image_url });
        }

        embed
    }

    fn payload(&self, job: &Job) -> serde_json::Value {
        json!({
            "username": self.username,
            "avatar_url": self.avatar_url,
            "embeds": [self.embed(job)],
        })
    }
}

impl Notifier for DiscordNotifier {
    async fn notify(&self, job: &Job) {
        let payload = self.payload(job);

        let response = match self.client.post(&self.webhook_url).json(&payload).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(webhook = %self.webhook_url, error = %err, "failed to send webhook");
                return;
            }
        };

        let status = response.status();
        if status.as_u16() >= 400 {
            tracing::warn!(webhook = %self.webhook_url, status = %status, "webhook returned an error status");
        }
    }

    fn name(&self) -> &str {
        "discord"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_omits_image_block_when_job_has_no_image() {
        let notifier = DiscordNotifier::new("https://discord.example/hook", "bot", "https://avatar.example/a.png");
        let job = Job::new("https://site.example", "m", "Widget", "Blue / M", "101", "", "20.00");
        let embed = notifier.embed(&job);
        assert!(embed.get("image").is_none());
    }

    #[test]
    fn embed_includes_image_block_when_job_has_an_image() {
        let notifier = DiscordNotifier::new("https://discord.example/hook", "bot", "https://avatar.example/a.png");
        let job = Job::new(
            "https://site.example",
            "m",
            "Widget",
            "Blue / M",
            "101",
            "https://cdn.example/img.png",
            "20.00",
        );
        let embed = notifier.embed(&job);
        assert_eq!(embed["image"]["url"], "https://cdn.example/img.png");
    }

    #[test]
    fn cart_add_url_combines_site_and_variant_id() {
        let notifier = DiscordNotifier::new("https://discord.example/hook", "bot", "");
        let job = Job::new("https://site.example", "m", "Widget", "Blue / M", "101", "", "20.00");
        let embed = notifier.embed(&job);
        assert_eq!(embed["url"], "https://site.example/cart/add?id=101");
    }

    #[test]
    fn embed_fields_carry_price_product_variant_and_id() {
        let notifier = DiscordNotifier::new("https://discord.example/hook", "bot", "");
        let job = Job::new("https://site.example", "m", "Widget", "Blue / M", "101", "", "20.00");
        let embed = notifier.embed(&job);
        let fields = embed["fields"].as_array().unwrap();
        assert_eq!(fields[0]["name"], "Price");
        assert_eq!(fields[0]["value"], "20.00");
        assert_eq!(fields[1]["value"], "Widget");
        assert_eq!(fields[2]["value"], "Blue / M");
        assert_eq!(fields[3]["value"], "101");
    }
}
