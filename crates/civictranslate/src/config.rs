//! CLI configuration: thin wrapper around `civictranslate_config`.
//!
//! Adds the `GlobalOpts`-aware resolution (--mode, --api-url, --timeout,
//! --no-latency, --as) on top of the shared file + env loading.

use civictranslate_core::DashboardConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use civictranslate_config::{
    Config, config_path, load_config, save_config, to_dashboard_config, token_path,
};

/// Role used when neither `--as` nor `default_role` is set.
const FALLBACK_ROLE: &str = "admin";

/// Resolve the role key to sign in with (flag > env > config > admin).
pub fn active_role(global: &GlobalOpts, config: &Config) -> String {
    global
        .role
        .clone()
        .or_else(|| config.default_role.map(|r| r.to_string()))
        .unwrap_or_else(|| FALLBACK_ROLE.into())
}

/// Apply CLI flag overrides to the file/env config.
pub fn apply_overrides(mut cfg: Config, global: &GlobalOpts) -> Config {
    if let Some(mode) = global.mode {
        cfg.mode = mode;
    }
    if let Some(ref url) = global.api_url {
        cfg.api.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.api.timeout_secs = timeout;
    }
    if global.no_latency {
        cfg.mock.simulate_latency = false;
    }
    cfg
}

/// Load config and translate it into a `DashboardConfig`.
pub fn resolve(global: &GlobalOpts) -> Result<(Config, DashboardConfig), CliError> {
    let cfg = apply_overrides(load_config()?, global);
    let dashboard = to_dashboard_config(&cfg)?;
    Ok((cfg, dashboard))
}
