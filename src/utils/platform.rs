use crate::error::{Result, WinupError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// PowerShell hosts in order of preference: PowerShell 7+, then Windows PowerShell.
const POWERSHELL_HOSTS: &[&str] = &["pwsh", "powershell"];

/// Resolve the PowerShell host used to drive the package manager client.
///
/// An explicit override may be a bare program name (looked up on PATH) or a
/// path to an executable.
pub fn resolve_powershell(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(host) = explicit {
        if host.components().count() > 1 || host.is_absolute() {
            if host.is_file() {
                return Ok(host.to_path_buf());
            }
            return Err(WinupError::DependencyMissing(format!(
                "PowerShell host not found at {}",
                host.display()
            )));
        }
        return which::which(host).map_err(|_| {
            WinupError::DependencyMissing(format!("PowerShell host '{}' not on PATH", host.display()))
        });
    }

    POWERSHELL_HOSTS
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or_else(|| {
            WinupError::DependencyMissing(format!(
                "PowerShell not found (tried: {})",
                POWERSHELL_HOSTS.join(", ")
            ))
        })
}

/// Run the child in its own process group so a terminal Ctrl-C reaches
/// only winup; the in-flight package manager call finishes undisturbed.
pub fn isolate_from_console_signals(cmd: &mut Command) {
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
        cmd.creation_flags(CREATE_NEW_PROCESS_GROUP);
    }
}

/// Build a non-interactive PowerShell invocation running `script`.
pub fn build_powershell_command(host: &Path, script: &str) -> Command {
    let mut cmd = Command::new(host);
    isolate_from_console_signals(&mut cmd);
    cmd.args([
        "-NoProfile",
        "-NonInteractive",
        "-ExecutionPolicy",
        "Bypass",
        "-Command",
        script,
    ]);
    cmd
}
