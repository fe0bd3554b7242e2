//! Command dispatcher
//!
//! Turns parsed CLI flags into update options and runs the session.

use crate::cli::args::Cli;
use crate::commands;
use crate::error::{Result, WinupError};
use crate::ui as output;
use std::time::Duration;

pub fn dispatch(args: &Cli) -> Result<()> {
    let options = update_options(args)?;

    // Machine output owns stdout; human output goes to the transcript only.
    if options.output.is_some() {
        output::set_quiet(true);
    }

    commands::update::run(options)
}

fn update_options(args: &Cli) -> Result<commands::update::UpdateOptions> {
    let timeout = match args.run.timeout {
        Some(0) => {
            return Err(WinupError::Other(
                "--timeout must be greater than zero".to_string(),
            ));
        }
        Some(secs) => Some(Duration::from_secs(secs)),
        None => None,
    };

    Ok(commands::update::UpdateOptions {
        dry_run: args.global.dry_run,
        log_dir: args.run.log_dir.clone(),
        powershell: args.run.powershell.clone(),
        timeout,
        output: args.global.output,
    })
}
