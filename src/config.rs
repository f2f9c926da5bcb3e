use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::commands::DEFAULT_REPORT_KEYWORD;

// ============================================================================
// Configuration
// ============================================================================
//
// Defaults work out of the box for the demo binary. Deployments override
// them with ORDERBOT_* environment variables or a JSON file.
//
// ============================================================================

const ENV_PREFIX: &str = "ORDERBOT_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid boolean for {key}: '{value}'")]
    InvalidBool { key: String, value: String },
}

/// Where checkout redirects go and how the gateway names an order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSettings {
    pub item_name_prefix: String,
    /// Payment gateway endpoint; empty disables checkout
    pub host_url: String,
    pub return_url: String,
    pub cancel_url: String,
    pub notify_url: String,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            item_name_prefix: "Order #".to_string(),
            host_url: String::new(),
            return_url: String::new(),
            cancel_url: String::new(),
            notify_url: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub catalog_id: String,
    /// JSON catalog to load instead of the built-in demo catalog
    pub catalog_file: Option<PathBuf>,
    pub price_list_preamble: String,
    pub report_keyword: String,
    pub reports_enabled: bool,
    pub checkout: CheckoutSettings,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            catalog_id: "demo".to_string(),
            catalog_file: None,
            price_list_preamble: "Everything is priced in Rand.".to_string(),
            report_keyword: DEFAULT_REPORT_KEYWORD.to_string(),
            reports_enabled: true,
            checkout: CheckoutSettings::default(),
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, e.g. a map in tests. Keys are looked up
    /// with the `ORDERBOT_` prefix. `CONFIG_FILE` names a JSON file used as
    /// the base; every other key overrides what it set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = match get("CONFIG_FILE") {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };

        if let Some(v) = get("CATALOG_ID") {
            config.catalog_id = v;
        }
        if let Some(v) = get("CATALOG_FILE") {
            config.catalog_file = Some(PathBuf::from(v));
        }
        if let Some(v) = get("PRICE_LIST_PREAMBLE") {
            config.price_list_preamble = v;
        }
        if let Some(v) = get("REPORT_KEYWORD") {
            config.report_keyword = v;
        }
        if let Some(v) = get("REPORTS_ENABLED") {
            config.reports_enabled = parse_bool("REPORTS_ENABLED", &v)?;
        }
        if let Some(v) = get("ITEM_NAME_PREFIX") {
            config.checkout.item_name_prefix = v;
        }
        if let Some(v) = get("PAYMENT_HOST_URL") {
            config.checkout.host_url = v;
        }
        if let Some(v) = get("RETURN_URL") {
            config.checkout.return_url = v;
        }
        if let Some(v) = get("CANCEL_URL") {
            config.checkout.cancel_url = v;
        }
        if let Some(v) = get("NOTIFY_URL") {
            config.checkout.notify_url = v;
        }

        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        tracing::info!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Keyword for the report rule, or `None` when reports are switched off
    pub fn report_rule_keyword(&self) -> Option<&str> {
        self.reports_enabled.then_some(self.report_keyword.as_str())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: format!("{}{}", ENV_PREFIX, key),
            value: value.to_string(),
        }),
    }
}
