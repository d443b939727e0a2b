//! Config tree, YAML loader, and validator.
//!
//! Unknown keys are rejected (`deny_unknown_fields`) to catch typos in
//! config files.

mod error;
mod model;
mod validate;

pub use error::ConfigError;
pub use model::{Config, MonitorConfig, NotifierConfig, ProductId, SiteConfig};

/// Reads, parses, and validates a config file at `path`. Returns a
/// `ConfigError` describing every violation at once on failure.
pub fn load(path: &str) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_string(), source })?;

    let cfg: Config = serde_yaml::from_str(&raw)?;

    let errors = validate::validate(&cfg);
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_rejects_missing_file() {
        let err = load("/nonexistent/path/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_parses_and_validates_a_minimal_config() {
        let dir = std::env::temp_dir().join(format!("stockwatch-config-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(
            &path,
            r#"
global_poll_interval: 30s
global_retry_interval: 5s
global_max_retries: 3
sites:
  - name: acme
    site_url: https://acme.example
    enabled: true
    notifier:
      webhook_url: https://discord.example/hook
      username: bot
      avatar_url: ""
    monitors:
      - name: widgets
        type: shopify
        endpoint_url: https://acme.example/products.json
        enabled: true
        product_ids:
          - id: 1
            label: widget
"#,
        )
        .unwrap();

        let cfg = load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.sites.len(), 1);
        assert_eq!(cfg.sites[0].monitors[0].product_ids[0].id, 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let dir = std::env::temp_dir().join(format!("stockwatch-config-test-unknown-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(
            &path,
            r#"
global_poll_interval: 30s
global_retry_interval: 5s
global_max_retries: 3
typo_field: true
sites: []
"#,
        )
        .unwrap();

        let err = load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
