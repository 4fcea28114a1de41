//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util;

/// Format config for display as TOML.
fn format_config(cfg: &Config) -> String {
    toml::to_string_pretty(cfg)
        .unwrap_or_else(|e| format!("# failed to render config: {e}"))
        .trim_end()
        .to_owned()
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::apply_overrides(config::load_config()?, global);
            let out = output::render_single(global.output, &cfg, format_config, format_config);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                let prompt = format!("{} already exists. Overwrite?", path.display());
                if !util::confirm(&prompt, "config init", global.yes)? {
                    return Ok(());
                }
            }

            let written = config::save_config(&Config::default())?;
            if !global.quiet {
                eprintln!("Config written to {}", written.display());
            }
            Ok(())
        }
    }
}
