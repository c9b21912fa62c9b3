use crate::storage::{DEFAULT_ITEMS_KEY, DEFAULT_ORDER_KEY};
use serde::{Deserialize, Serialize};
use tracing::Level;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// localStorage key holding the item list.
    pub items_key: String,
    /// localStorage key holding the committed row order.
    pub order_key: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            items_key: DEFAULT_ITEMS_KEY.to_string(),
            order_key: DEFAULT_ORDER_KEY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads overrides from `window.ENV`.
    ///
    /// Both upper-case (`ITEMS_KEY`) and lower-case (`items_key`) names are
    /// accepted; anything missing keeps its default.
    pub fn from_window() -> Self {
        let mut config = Self::default();

        let Some(env) = web_sys::window().and_then(|w| w.get("ENV")) else {
            return config;
        };
        if env.is_undefined() || !env.is_object() {
            return config;
        }

        let read = |upper: &str, lower: &str| -> Option<String> {
            [upper, lower].iter().find_map(|name| {
                js_sys::Reflect::get(&env, &(*name).into())
                    .ok()
                    .and_then(|v| v.as_string())
                    .filter(|s| !s.trim().is_empty())
            })
        };

        if let Some(key) = read("ITEMS_KEY", "items_key") {
            config.items_key = key;
        }
        if let Some(key) = read("ORDER_KEY", "order_key") {
            config.order_key = key;
        }
        if let Some(level) = read("LOG_LEVEL", "log_level") {
            config.log_level = level;
        }

        config
    }

    pub fn max_level(&self) -> Level {
        parse_level(&self.log_level)
    }
}

pub fn parse_level(raw: &str) -> Level {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys_match_existing_browser_data() {
        let config = AppConfig::default();
        assert_eq!(config.items_key, "items");
        assert_eq!(config.order_key, "listOrder");
        assert_eq!(config.max_level(), Level::INFO);
    }

    #[test]
    fn test_parse_level_is_case_insensitive() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level(" warn "), Level::WARN);
        assert_eq!(parse_level("Warning"), Level::WARN);
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_unknown_falls_back_to_info() {
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }
}
