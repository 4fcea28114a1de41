//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;

use civictranslate_core::{Dashboard, RequestId, Route, TranslationRequest};
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

/// Build the dashboard, sign in, pass the route guard, and load requests.
///
/// A failed initial load prints its notifications and surfaces as the error
/// that caused it, so the process exits with the matching code.
pub async fn open_dashboard(global: &GlobalOpts) -> Result<Dashboard, CliError> {
    let (cfg, dashboard_config) = config::resolve(global)?;
    let dashboard = Dashboard::new(dashboard_config)?;

    let role = config::active_role(global, &cfg);
    let user = dashboard.session().login(&role)?;
    debug!(name = %user.name, role = %user.role, "signed in");

    if dashboard.navigator().navigate(Route::Dashboard) != Route::Dashboard {
        return Err(CliError::LoginRequired);
    }

    let bar = output::spinner("Loading requests...", global);
    dashboard.store().fetch_requests().await;
    bar.finish_and_clear();

    match dashboard.store().last_failure() {
        Some(err) => {
            output::print_notifications(&dashboard.notifier().snapshot(), global);
            Err(err.into())
        }
        None => Ok(dashboard),
    }
}

/// Look up a request in the loaded collection.
pub fn find_request(
    dashboard: &Dashboard,
    id: &str,
) -> Result<Arc<TranslationRequest>, CliError> {
    dashboard
        .store()
        .get(&RequestId::from(id))
        .ok_or_else(|| CliError::NotFound { id: id.into() })
}

/// Fail unless the signed-in user is an admin.
pub fn require_admin(dashboard: &Dashboard, action: &str) -> Result<(), CliError> {
    if dashboard.session().is_admin() {
        return Ok(());
    }
    let role = dashboard
        .session()
        .current_user()
        .map_or_else(|| "guest".into(), |u| u.role.to_string());
    Err(CliError::PermissionDenied {
        action: action.into(),
        role,
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to prompt on, `--yes` is mandatory.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
