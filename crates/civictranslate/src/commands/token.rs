//! Token subcommand handlers.
//!
//! The token lives in a single file under the platform data directory; the
//! live backend reads it before every request and removes it on a 401.

use std::io::IsTerminal;

use secrecy::SecretString;
use serde::Serialize;

use civictranslate_api::{FileTokenStore, TokenStore};
use civictranslate_core::CoreError;

use crate::cli::{GlobalOpts, TokenArgs, TokenCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct TokenStatus {
    stored: bool,
    path: String,
}

/// Read the token from `value`, or prompt for it without echo.
fn read_token(value: Option<String>) -> Result<SecretString, CliError> {
    let raw = match value {
        Some(v) => v,
        None if std::io::stdin().is_terminal() => rpassword::prompt_password("Bearer token: ")?,
        None => {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            line
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(SecretString::from(trimmed.to_owned()))
}

pub fn handle(args: TokenArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = FileTokenStore::new(config::token_path());

    match args.command {
        TokenCommand::Set { value } => {
            let token = read_token(value)?;
            store.store(token).map_err(CoreError::from)?;
            if !global.quiet {
                eprintln!("Token saved to {}", store.path().display());
            }
            Ok(())
        }

        TokenCommand::Clear => {
            store.clear();
            if !global.quiet {
                eprintln!("Token cleared");
            }
            Ok(())
        }

        TokenCommand::Status => {
            let status = TokenStatus {
                stored: store.load().is_some(),
                path: store.path().display().to_string(),
            };
            let out = output::render_single(
                global.output,
                &status,
                |s| {
                    if s.stored {
                        format!("Token stored at {}", s.path)
                    } else {
                        "No token stored".into()
                    }
                },
                |s| s.stored.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
