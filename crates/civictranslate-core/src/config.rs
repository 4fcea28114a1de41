// ── Runtime dashboard configuration ──
//
// These types describe *where* requests come from and how long transient
// state lives. They never touch disk: the CLI (via civictranslate-config)
// builds a `DashboardConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default API root used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5173/api";

/// Default lifetime of a notification before it is removed.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(3200);

/// Which backend the data access layer talks to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DataMode {
    /// In-memory dataset with simulated latency.
    #[default]
    Mock,
    /// REST API at [`DashboardConfig::api_url`].
    Live,
}

/// Artificial per-operation delays applied by the mock backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub list: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(600),
            create: Duration::from_millis(400),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(300),
        }
    }
}

impl MockLatency {
    /// No artificial delay at all.
    pub fn none() -> Self {
        Self {
            list: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }
}

/// Where the bearer token for live mode is kept.
#[derive(Debug, Clone)]
pub enum TokenSource {
    /// Held in memory for the process lifetime.
    Memory(Option<SecretString>),
    /// Persisted to a file (the CLI's equivalent of browser local storage).
    File(PathBuf),
}

impl Default for TokenSource {
    fn default() -> Self {
        Self::Memory(None)
    }
}

/// Configuration for a single dashboard instance.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Mock or live backend.
    pub mode: DataMode,
    /// API root for live mode (e.g., `http://localhost:5173/api`).
    pub api_url: Url,
    /// Request timeout for live mode.
    pub timeout: Duration,
    /// Bearer token storage for live mode.
    pub token: TokenSource,
    /// Delays applied in mock mode.
    pub mock_latency: MockLatency,
    /// How long notifications stay visible.
    pub notification_ttl: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            mode: DataMode::Mock,
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: civictranslate_api::transport::DEFAULT_TIMEOUT,
            token: TokenSource::default(),
            mock_latency: MockLatency::default(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_behaviour() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.mode, DataMode::Mock);
        assert_eq!(cfg.timeout, Duration::from_secs(8));
        assert_eq!(cfg.notification_ttl, Duration::from_millis(3200));
        assert_eq!(cfg.mock_latency.list, Duration::from_millis(600));
    }

    #[test]
    fn data_mode_parses_lowercase() {
        assert_eq!("live".parse::<DataMode>().unwrap(), DataMode::Live);
        assert_eq!(DataMode::Mock.to_string(), "mock");
        assert!("remote".parse::<DataMode>().is_err());
    }
}
