//! Application configuration.
//!
//! Loaded from the JSON block embedded in `index.html`:
//!
//! ```json
//! {
//!   "apiBaseUrl": "https://erp.example.com/api",
//!   "pageSize": 25,
//!   "retry": { "maxAttempts": 4 },
//!   "serviceWorker": { "updateIntervalMins": 30 }
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use serde::{Deserialize, Serialize};

/// Most attempts a retry schedule may configure
pub const MAX_RETRY_ATTEMPTS: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Prefix for every REST call
    pub api_base_url: String,
    /// Items per page on paginated lists
    pub page_size: u32,
    pub poll_interval_secs: u32,
    /// Saved routes older than this are ignored on restore
    pub route_max_age_days: i64,
    /// Stock items with no reorder level are low at or below this quantity
    pub low_stock_threshold: u32,
    pub retry: RetrySettings,
    pub batch: BatchSettings,
    pub service_worker: ServiceWorkerSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub backoff_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchSettings {
    pub size: usize,
    pub pause_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceWorkerSettings {
    pub script: String,
    pub scope: String,
    pub update_interval_mins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogSettings {
    /// Lines kept in the in-memory ring
    pub capacity: usize,
    /// One of trace, debug, info, warn, error
    pub level: String,
}

/// Returns the API base URL, honouring the `BIZOPS_API_BASE` build-time override.
pub fn default_api_base_url() -> String {
    option_env!("BIZOPS_API_BASE").unwrap_or("/api").to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: 20,
            poll_interval_secs: 30,
            route_max_age_days: 30,
            low_stock_threshold: 5,
            retry: RetrySettings::default(),
            batch: BatchSettings::default(),
            service_worker: ServiceWorkerSettings::default(),
            log: LogSettings::default(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self { max_attempts: 3, initial_delay_ms: 1000, backoff_factor: 2.0 }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self { size: 3, pause_ms: 500 }
    }
}

impl Default for ServiceWorkerSettings {
    fn default() -> Self {
        Self {
            script: "/admin/sw.js".to_string(),
            scope: "/admin/".to_string(),
            update_interval_mins: 60,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { capacity: 500, level: "info".to_string() }
    }
}

impl AppConfig {
    /// Parse and validate a JSON config block
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid { field: "pageSize", reason: "must be at least 1" });
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid { field: "pollIntervalSecs", reason: "must be at least 1" });
        }
        if self.batch.size == 0 {
            return Err(ConfigError::Invalid { field: "batch.size", reason: "must be at least 1" });
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid { field: "retry.maxAttempts", reason: "must be at least 1" });
        }
        if self.retry.max_attempts > MAX_RETRY_ATTEMPTS {
            return Err(ConfigError::Invalid { field: "retry.maxAttempts", reason: "must be at most 10" });
        }
        if !self.retry.backoff_factor.is_finite() || self.retry.backoff_factor < 1.0 {
            return Err(ConfigError::Invalid { field: "retry.backoffFactor", reason: "must be a finite number >= 1" });
        }
        Ok(())
    }

    /// `api_base_url` joined with `path`, with exactly one slash between them
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.batch.size, 3);
        assert_eq!(config.retry.initial_delay_ms, 1000);
    }

    #[test]
    fn test_partial_nested_override() {
        let config = AppConfig::from_json(r#"{"pageSize":50,"retry":{"maxAttempts":5}}"#).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.initial_delay_ms, 1000);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_json(r#"{"batch":{"size":0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "batch.size", .. }));
        assert!(matches!(AppConfig::from_json("{not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_retry_schedule_bounds() {
        for json in [
            r#"{"retry":{"backoffFactor":-2.0}}"#,
            r#"{"retry":{"backoffFactor":0.5}}"#,
            r#"{"retry":{"maxAttempts":100}}"#,
        ] {
            let err = AppConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{json} was accepted");
        }
        let config = AppConfig::from_json(r#"{"retry":{"maxAttempts":10,"backoffFactor":1.0}}"#).unwrap();
        assert_eq!(config.retry.max_attempts, MAX_RETRY_ATTEMPTS);
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = AppConfig { api_base_url: "https://erp.example.com/api/".into(), ..Default::default() };
        assert_eq!(config.endpoint("/suppliers"), "https://erp.example.com/api/suppliers");
        assert_eq!(config.endpoint("items/4"), "https://erp.example.com/api/items/4");
    }
}
