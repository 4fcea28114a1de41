//! Shared configuration for the CivicTranslate CLI.
//!
//! TOML file plus `CIVICTRANSLATE_*` environment overrides, platform path
//! resolution, and translation to `civictranslate_core::DashboardConfig`.
//! The core crate never reads files; everything disk-related lives here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use civictranslate_core::{DashboardConfig, DataMode, MockLatency, Role, TokenSource};

/// Prefix for environment overrides, e.g. `CIVICTRANSLATE_API_BASE_URL`.
pub const ENV_PREFIX: &str = "CIVICTRANSLATE_";

const SECTIONS: [&str; 3] = ["api", "mock", "notifications"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// `mock` (in-memory dataset) or `live` (REST API).
    #[serde(default)]
    pub mode: DataMode,

    /// Role used when a command does not pass `--as`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_role: Option<Role>,

    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub mock: MockSection,

    #[serde(default)]
    pub notifications: NotificationSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSection {
    /// API root. Relative values are resolved against `origin`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Origin used to resolve a relative `base_url`.
    #[serde(default = "default_origin")]
    pub origin: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            origin: default_origin(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MockSection {
    /// Apply the artificial per-operation delays.
    #[serde(default = "default_true")]
    pub simulate_latency: bool,
}

impl Default for MockSection {
    fn default() -> Self {
        Self {
            simulate_latency: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationSection {
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

fn default_base_url() -> String {
    "/api".into()
}
fn default_origin() -> String {
    "http://localhost:5173".into()
}
fn default_timeout_secs() -> u64 {
    8
}
fn default_ttl_ms() -> u64 {
    3200
}
fn default_true() -> bool {
    true
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("gov", "civictranslate", "civictranslate")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", "civictranslate", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Where the live-mode bearer token is persisted.
pub fn token_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", "civictranslate", "token"]),
        |dirs| dirs.data_dir().join("token"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load the full config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + environment. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(env_provider());

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning defaults if anything goes wrong.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// `CIVICTRANSLATE_API_BASE_URL` → `api.base_url`; top-level keys such as
/// `CIVICTRANSLATE_DEFAULT_ROLE` stay flat.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        for section in SECTIONS {
            if let Some(rest) = key
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key.into()
    })
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to runtime config ───────────────────────────────────

/// Resolve `base_url` against `origin` unless it is already absolute.
pub fn resolve_api_url(base_url: &str, origin: &str) -> Result<Url, ConfigError> {
    match Url::parse(base_url) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let origin = Url::parse(origin).map_err(|e| ConfigError::Validation {
                field: "api.origin".into(),
                reason: format!("invalid URL '{origin}': {e}"),
            })?;
            origin.join(base_url).map_err(|e| ConfigError::Validation {
                field: "api.base_url".into(),
                reason: format!("cannot join '{base_url}' onto {origin}: {e}"),
            })
        }
        Err(e) => Err(ConfigError::Validation {
            field: "api.base_url".into(),
            reason: format!("invalid URL '{base_url}': {e}"),
        }),
    }
}

/// Build a `DashboardConfig`, persisting the token under [`token_path`].
pub fn to_dashboard_config(cfg: &Config) -> Result<DashboardConfig, ConfigError> {
    to_dashboard_config_with(cfg, TokenSource::File(token_path()))
}

/// Build a `DashboardConfig` with an explicit token source.
pub fn to_dashboard_config_with(
    cfg: &Config,
    token: TokenSource,
) -> Result<DashboardConfig, ConfigError> {
    if cfg.api.timeout_secs == 0 {
        return Err(ConfigError::Validation {
            field: "api.timeout_secs".into(),
            reason: "must be greater than zero".into(),
        });
    }

    Ok(DashboardConfig {
        mode: cfg.mode,
        api_url: resolve_api_url(&cfg.api.base_url, &cfg.api.origin)?,
        timeout: Duration::from_secs(cfg.api.timeout_secs),
        token,
        mock_latency: if cfg.mock.simulate_latency {
            MockLatency::default()
        } else {
            MockLatency::none()
        },
        notification_ttl: Duration::from_millis(cfg.notifications.ttl_ms),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg.mode, DataMode::Mock);
        assert_eq!(cfg.api.base_url, "/api");
        assert_eq!(cfg.api.timeout_secs, 8);
        assert_eq!(cfg.notifications.ttl_ms, 3200);
        assert!(cfg.mock.simulate_latency);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "mode = \"live\"\ndefault_role = \"client\"\n\n[api]\nbase_url = \"https://translate.example.gov/v1\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.mode, DataMode::Live);
        assert_eq!(cfg.default_role, Some(Role::Client));
        assert_eq!(cfg.api.base_url, "https://translate.example.gov/v1");
        assert_eq!(cfg.api.origin, "http://localhost:5173");
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            mode: DataMode::Live,
            default_role: Some(Role::Admin),
            notifications: NotificationSection { ttl_ms: 5000 },
            ..Config::default()
        };

        save_config_to(&cfg, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn relative_base_url_joins_origin() {
        let url = resolve_api_url("/api", "http://localhost:5173").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5173/api");

        let url = resolve_api_url("https://api.example.gov/", "http://ignored").unwrap();
        assert_eq!(url.as_str(), "https://api.example.gov/");

        assert!(resolve_api_url("/api", "not a url").is_err());
    }

    #[test]
    fn dashboard_config_follows_sections() {
        let cfg = Config {
            mock: MockSection {
                simulate_latency: false,
            },
            ..Config::default()
        };
        let dash = to_dashboard_config_with(&cfg, TokenSource::default()).unwrap();

        assert_eq!(dash.mode, DataMode::Mock);
        assert_eq!(dash.api_url.as_str(), "http://localhost:5173/api");
        assert_eq!(dash.timeout, Duration::from_secs(8));
        assert_eq!(dash.mock_latency, MockLatency::none());
        assert_eq!(dash.notification_ttl, Duration::from_millis(3200));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut cfg = Config::default();
        cfg.api.timeout_secs = 0;
        let err = to_dashboard_config_with(&cfg, TokenSource::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "api.timeout_secs"));
    }

    #[test]
    fn paths_end_in_expected_file_names() {
        assert!(config_path().ends_with("config.toml"));
        assert!(token_path().ends_with("token"));
    }
}
