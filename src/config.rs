//! Configuration management

use std::{path::Path, time::Duration};

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

use crate::{Error, Result};

/// Content property alias that always carries the page's own expiry
pub const UNPUBLISH_AT_FIELD: &str = "unpublishAt";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP caching configuration
    pub caching: CachingConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP caching configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachingConfig {
    /// Enable HTTP caching headers.
    /// Only an explicit `false` (any case) disables; anything else enables.
    #[serde(deserialize_with = "deserialize_enabled")]
    pub enabled: bool,
    /// Default freshness window in seconds
    pub default_period: u64,
    /// Extra content properties holding expiry dates.
    /// `unpublishAt` is always consulted as well.
    pub expiry_fields: Vec<String>,
}

impl Default for CachingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_period: 86_400,
            expiry_fields: Vec::new(),
        }
    }
}

impl CachingConfig {
    /// Default freshness window
    #[must_use]
    pub fn default_period(&self) -> Duration {
        Duration::from_secs(self.default_period)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (text, json)
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: None,
        }
    }
}

/// Accept any value for the caching switch; only `false` disables
fn deserialize_enabled<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Switch {
        Flag(bool),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Switch::deserialize(deserializer)? {
        Switch::Flag(flag) => flag,
        Switch::Text(text) => !text.trim().eq_ignore_ascii_case("false"),
        Switch::Other(_) => true,
    })
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Environment variables use the `CONTENT_CACHE_` prefix with `__` between
    /// sections, e.g. `CONTENT_CACHE_CACHING__ENABLED=false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        // Load from file if provided
        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        figment = figment.merge(Env::prefixed("CONTENT_CACHE_").split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        tracing::debug!(
            enabled = config.caching.enabled,
            default_period_secs = config.caching.default_period,
            expiry_fields = config.caching.expiry_fields.len(),
            "Loaded caching configuration"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    const CONFIG_FILE: &str = "content-cache.yaml";

    fn caching_from_yaml(yaml: &str) -> CachingConfig {
        figment::Figment::from(Yaml::string(yaml))
            .extract::<Config>()
            .unwrap()
            .caching
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.caching.enabled);
        assert_eq!(config.caching.default_period(), Duration::from_secs(86_400));
        assert!(config.caching.expiry_fields.is_empty());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, None);
    }

    #[test]
    fn test_load_missing_file() {
        Jail::expect_with(|_jail| {
            let result = Config::load(Some(Path::new("/nonexistent/content-cache.yaml")));
            assert!(matches!(result, Err(Error::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn test_load_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                "caching:\n  default_period: 3600\n  expiry_fields: [embargoEnd, offerEnds]\nlogging:\n  level: debug\n  format: json\n",
            )?;

            let config = Config::load(Some(Path::new(CONFIG_FILE))).unwrap();

            assert!(config.caching.enabled);
            assert_eq!(config.caching.default_period(), Duration::from_secs(3600));
            assert_eq!(config.caching.expiry_fields, vec!["embargoEnd", "offerEnds"]);
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.logging.format.as_deref(), Some("json"));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_bad_period() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "caching:\n  default_period: soon\n")?;

            let result = Config::load(Some(Path::new(CONFIG_FILE)));
            assert!(matches!(result, Err(Error::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                "caching:\n  enabled: true\n  default_period: 3600\nlogging:\n  level: warn\n",
            )?;
            jail.set_env("CONTENT_CACHE_CACHING__ENABLED", "false");
            jail.set_env("CONTENT_CACHE_CACHING__DEFAULT_PERIOD", "60");

            let config = Config::load(Some(Path::new(CONFIG_FILE))).unwrap();

            assert!(!config.caching.enabled);
            assert_eq!(config.caching.default_period(), Duration::from_secs(60));
            assert_eq!(config.logging.level, "warn");
            Ok(())
        });
    }

    #[test]
    fn test_env_without_file() {
        Jail::expect_with(|jail| {
            jail.set_env("CONTENT_CACHE_CACHING__ENABLED", "FALSE");
            jail.set_env("CONTENT_CACHE_LOGGING__FORMAT", "json");

            let config = Config::load(None).unwrap();

            assert!(!config.caching.enabled);
            assert_eq!(config.caching.default_period(), Duration::from_secs(86_400));
            assert_eq!(config.logging.format.as_deref(), Some("json"));
            Ok(())
        });
    }

    #[test]
    fn test_env_numeric_switch_enables() {
        Jail::expect_with(|jail| {
            jail.set_env("CONTENT_CACHE_CACHING__ENABLED", "0");

            let config = Config::load(None).unwrap();

            assert!(config.caching.enabled);
            Ok(())
        });
    }

    #[test]
    fn test_enabled_switch_accepts_bool() {
        assert!(!caching_from_yaml("caching:\n  enabled: false\n").enabled);
        assert!(caching_from_yaml("caching:\n  enabled: true\n").enabled);
    }

    #[test]
    fn test_enabled_switch_only_false_disables() {
        assert!(!caching_from_yaml("caching:\n  enabled: \"FALSE\"\n").enabled);
        assert!(!caching_from_yaml("caching:\n  enabled: \"False\"\n").enabled);
        assert!(caching_from_yaml("caching:\n  enabled: \"no\"\n").enabled);
        assert!(caching_from_yaml("caching:\n  enabled: \"\"\n").enabled);
        assert!(caching_from_yaml("caching:\n  enabled: \"TRUE\"\n").enabled);
    }

    #[test]
    fn test_enabled_switch_blank_or_numeric_enables() {
        assert!(caching_from_yaml("caching:\n  enabled:\n").enabled);
        assert!(caching_from_yaml("caching:\n  enabled: ~\n").enabled);
        assert!(caching_from_yaml("caching:\n  enabled: 0\n").enabled);
        assert!(caching_from_yaml("caching:\n  enabled: 1\n").enabled);
        assert!(caching_from_yaml("caching:\n  enabled: 2.5\n").enabled);
    }

    #[test]
    fn test_missing_switch_enables() {
        assert!(caching_from_yaml("caching:\n  default_period: 60\n").enabled);
    }
}
