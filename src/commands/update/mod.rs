//! Update command
//!
//! The whole run: open a transcript, make sure the package manager client
//! is installed, find packages with pending updates, and update each one
//! (with a reinstall fallback). The transcript is closed on every exit path.

mod apply;
mod bootstrap;
mod enumerate;
mod presentation;

pub use apply::{apply_updates, apply_updates_until};
pub use bootstrap::ensure_client;
pub use enumerate::pending_updates;

use crate::core::types::{PackageAction, PackageReport, UpdateReport};
use crate::error::Result;
use crate::packages::{ClientBootstrap, PackageClient, WinGetClient};
use crate::ui as output;
use crate::utils::machine_output::{self, OutputFormat};
use crate::utils::{paths, platform};
use chrono::Local;
use std::path::PathBuf;
use std::time::Duration;

pub const UP_TO_DATE_MESSAGE: &str = "All applications are up to date.";

#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Bootstrap and query only; apply nothing
    pub dry_run: bool,
    /// Transcript directory (None = `<home>/winup-logs`)
    pub log_dir: Option<PathBuf>,
    /// PowerShell host override
    pub powershell: Option<PathBuf>,
    /// Per-call limit for package manager commands
    pub timeout: Option<Duration>,
    /// Emit a machine-readable report on stdout
    pub output: Option<OutputFormat>,
}

/// Run one complete update session.
pub fn run(options: UpdateOptions) -> Result<()> {
    let transcript_path = paths::resolve_transcript_path(options.log_dir.as_deref(), Local::now())?;
    let session = output::start_transcript(&transcript_path)?;
    output::info(&format!("Transcript: {}", session.path().display()));

    let outcome = platform::resolve_powershell(options.powershell.as_deref())
        .map(|host| WinGetClient::new(host, options.timeout))
        .and_then(|client| run_session(&client, options.dry_run));

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            output::record(&format!("[ERROR] Update run aborted: {}", e));
            return Err(e);
        }
    };

    presentation::print_summary(&report);
    drop(session);

    if let Some(format) = options.output {
        let (warnings, errors) = presentation::machine_messages(&report);
        machine_output::emit_v1("update", &report, warnings, errors, format)?;
    }

    Ok(())
}

/// Bootstrap, enumerate, apply. Fatal errors (bootstrap or query) are
/// returned; per-package failures are recorded in the report.
pub fn run_session<C>(client: &C, dry_run: bool) -> Result<UpdateReport>
where
    C: ClientBootstrap + PackageClient + ?Sized,
{
    output::header("Checking package manager client");
    let bootstrap = ensure_client(client)?;

    output::header("Checking for updates");
    let pending = pending_updates(client)?;

    if pending.is_empty() {
        output::success(UP_TO_DATE_MESSAGE);
        return Ok(UpdateReport {
            bootstrap,
            dry_run,
            packages: Vec::new(),
        });
    }

    presentation::print_pending(&pending);

    let packages = if dry_run {
        pending
            .iter()
            .map(|pkg| PackageReport::new(pkg, PackageAction::Pending, None))
            .collect()
    } else {
        output::header("Applying updates");
        apply_updates(client, &pending)
    };

    Ok(UpdateReport {
        bootstrap,
        dry_run,
        packages,
    })
}
