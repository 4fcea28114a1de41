//! Command dispatch: bridges CLI args -> dashboard actions -> output formatting.

pub mod config_cmd;
pub mod requests;
pub mod stats;
pub mod token;
pub mod util;
pub mod whoami;

use civictranslate_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a dashboard-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Requests(args) => requests::handle(dashboard, args, global).await,
        Command::Stats => stats::handle(dashboard, global),
        Command::Whoami => whoami::handle(dashboard, global),
        // Config, Token, and Completions are handled before dispatch
        Command::Config(_) | Command::Token(_) | Command::Completions(_) => unreachable!(),
    }
}
