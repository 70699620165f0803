//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default refresh period of the polling loop.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3_000;

/// Settings for a dashboard client session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Origin of the REST service, e.g. `http://localhost:3000`. Empty
    /// means the origin the dashboard was served from.
    pub api_base_url: String,
    /// Milliseconds between two full refreshes.
    pub poll_interval_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl BoardConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL to send requests to when the page was loaded from `origin`.
    pub fn resolve_base_url(&self, origin: &str) -> String {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            origin.trim_end_matches('/').to_string()
        } else {
            base.trim_end_matches('/').to_string()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: BoardConfig = serde_json::from_str(r#"{"poll_interval_ms": 10000}"#).unwrap();
        assert_eq!(config.api_base_url, "");
        assert_eq!(config.poll_interval(), Duration::from_secs(10));
    }

    #[test]
    fn empty_base_url_means_same_origin() {
        let config = BoardConfig::default();
        assert_eq!(
            config.resolve_base_url("http://localhost:8080"),
            "http://localhost:8080"
        );
        assert_eq!(config.resolve_base_url("https://board.example/"), "https://board.example");
    }

    #[test]
    fn explicit_base_url_wins_over_origin() {
        let config = BoardConfig::with_base_url("http://localhost:3000/");
        assert_eq!(
            config.resolve_base_url("http://localhost:8080"),
            "http://localhost:3000"
        );
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = BoardConfig {
            poll_interval_ms: 0,
            ..BoardConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}
