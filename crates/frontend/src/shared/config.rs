use contracts::shared::list_filter::SummaryOptions;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::system::auth::storage;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub lists: ListsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Port of the REST API on the page's host
    pub port: u16,
    /// Path prefix of every endpoint
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListsConfig {
    /// Delay before a filter change triggers a fetch
    pub debounce_ms: u32,
    pub expiring_window_days: i64,
    /// Location values meaning "not placed in a section yet"
    pub unassigned_locations: Vec<String>,
}

impl ListsConfig {
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            expiring_window_days: self.expiring_window_days,
            unassigned_groups: self.unassigned_locations.clone(),
        }
    }
}

/// Partial config accepted as an override; missing keys keep the defaults.
#[derive(Debug, Deserialize, Default)]
struct ConfigOverride {
    #[serde(default)]
    api: Option<ApiOverride>,
    #[serde(default)]
    lists: Option<ListsOverride>,
}

#[derive(Debug, Deserialize, Default)]
struct ApiOverride {
    port: Option<u16>,
    prefix: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ListsOverride {
    debounce_ms: Option<u32>,
    expiring_window_days: Option<i64>,
    unassigned_locations: Option<Vec<String>>,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
prefix = "/api"

[lists]
debounce_ms = 300
expiring_window_days = 30
unassigned_locations = ["pending"]
"#;

/// localStorage key holding an optional TOML override
pub const CONFIG_OVERRIDE_KEY: &str = "app_config";

/// Parse the embedded defaults and apply `override_toml` on top of them.
pub fn parse_config(override_toml: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut config: AppConfig = toml::from_str(DEFAULT_CONFIG)?;
    let Some(raw) = override_toml.filter(|s| !s.trim().is_empty()) else {
        return Ok(config);
    };

    let patch: ConfigOverride = toml::from_str(raw)?;
    if let Some(api) = patch.api {
        if let Some(port) = api.port {
            config.api.port = port;
        }
        if let Some(prefix) = api.prefix {
            config.api.prefix = prefix;
        }
    }
    if let Some(lists) = patch.lists {
        if let Some(ms) = lists.debounce_ms {
            config.lists.debounce_ms = ms;
        }
        if let Some(days) = lists.expiring_window_days {
            config.lists.expiring_window_days = days;
        }
        if let Some(locations) = lists.unassigned_locations {
            config.lists.unassigned_locations = locations;
        }
    }
    Ok(config)
}

/// Load configuration
///
/// Search order:
/// 1. Override stored in localStorage under `app_config`
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<AppConfig> {
    let stored = storage::get_item(CONFIG_OVERRIDE_KEY);
    match parse_config(stored.as_deref()) {
        Ok(config) => {
            if stored.is_some() {
                log::info!("Loaded config override from localStorage");
            }
            Ok(config)
        }
        Err(e) => {
            log::warn!("Invalid config override, using defaults: {}", e);
            parse_config(None)
        }
    }
}

static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load configuration: {}", e);
        AppConfig {
            api: ApiConfig {
                port: 3000,
                prefix: "/api".to_string(),
            },
            lists: ListsConfig {
                debounce_ms: 300,
                expiring_window_days: contracts::shared::list_filter::DEFAULT_EXPIRING_WINDOW_DAYS,
                unassigned_locations: vec![
                    contracts::shared::list_filter::UNASSIGNED_LOCATION.to_string(),
                ],
            },
        }
    })
});

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(None).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.prefix, "/api");
        assert_eq!(config.lists.debounce_ms, 300);
        assert_eq!(config.lists.expiring_window_days, 30);
        assert_eq!(config.lists.summary_options(), SummaryOptions::default());
    }

    #[test]
    fn test_override_merges() {
        let config = parse_config(Some("[lists]\ndebounce_ms = 500\n")).unwrap();
        assert_eq!(config.lists.debounce_ms, 500);
        assert_eq!(config.lists.expiring_window_days, 30);
        assert_eq!(config.api.port, 3000);
    }

    #[test]
    fn test_summary_options_follow_overrides() {
        let toml = r#"
            [lists]
            expiring_window_days = 7
            unassigned_locations = ["pending", "dock"]
        "#;
        let options = parse_config(Some(toml)).unwrap().lists.summary_options();
        assert_eq!(options.expiring_window_days, 7);
        assert_eq!(options.unassigned_groups, vec!["pending".to_string(), "dock".to_string()]);
    }

    #[test]
    fn test_invalid_override_is_error() {
        assert!(parse_config(Some("[lists\n")).is_err());
        assert!(parse_config(Some("   ")).is_ok());
    }
}
