use crate::model::Config;

/// Validates a loaded config tree against the rules the original
/// implementation enforces at startup. Collects every violation instead
/// of failing on the first one, so a single run surfaces the whole list.
pub fn validate(cfg: &Config) -> Vec<String> {
    let mut errors = Vec::new();

    if cfg.global_poll_interval.is_zero() {
        errors.push("global_poll_interval must be > 0".to_string());
    }
    if cfg.global_retry_interval.is_zero() {
        errors.push("global_retry_interval must be > 0".to_string());
    }
    if cfg.global_max_retries == 0 {
        errors.push("global_max_retries must be > 0".to_string());
    }
    if cfg.sites.is_empty() {
        errors.push("no sites defined".to_string());
    }

    for (i, site) in cfg.sites.iter().enumerate() {
        if !site.enabled {
            continue;
        }

        if site.name.trim().is_empty() {
            errors.push(format!("site #{i} has no name"));
        }
        if site.url.trim().is_empty() || !site.url.starts_with("https://") {
            errors.push(format!("site {:?} has an invalid or missing url", site.name));
        }
        if site.notifier.webhook_url.trim().is_empty() {
            errors.push(format!("site {:?} has no webhook_url", site.name));
        }
        if site.monitors.is_empty() {
            errors.push(format!("site {:?} has no monitors", site.name));
        }

        for mon in &site.monitors {
            if !mon.enabled {
                continue;
            }

            if mon.name.trim().is_empty() {
                errors.push(format!("a monitor in site {:?} has no name", site.name));
            }
            if mon.endpoint_url.trim().is_empty() {
                errors.push(format!("monitor {:?} in site {:?} has no endpoint_url", mon.name, site.name));
            }
            if mon.product_ids.is_empty() {
                errors.push(format!("monitor {:?} in site {:?} has no product_ids", mon.name, site.name));
            }
        }
    }

    errors
}
