//! Whoami command handler.

use std::sync::Arc;

use civictranslate_core::{Dashboard, UserProfile};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(u: &Arc<UserProfile>) -> String {
    [
        format!("Name:     {} ({})", u.name, u.initials),
        format!("Role:     {}", u.role),
        format!("Email:    {}", u.email),
    ]
    .join("\n")
}

pub fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let user = dashboard
        .session()
        .current_user()
        .ok_or(CliError::LoginRequired)?;
    let out = output::render_single(global.output, &user, detail, |u| u.role.to_string());
    output::print_output(&out, global.quiet);
    Ok(())
}
