use crate::core::types::Package;
use crate::error::{Result, WinupError};
use crate::packages::traits::{ClientBootstrap, PackageClient};
use crate::ui;
use crate::utils::command_exec::run_command;
use crate::utils::platform::build_powershell_command;
use crate::utils::sanitize::sanitize_for_display;
use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

pub mod parse;
pub mod scripts;

use scripts::Operation;

/// WinGet driven through the `Microsoft.WinGet.Client` PowerShell module
pub struct WinGetClient {
    host: PathBuf,
    timeout: Option<Duration>,
}

impl WinGetClient {
    pub fn new(host: PathBuf, timeout: Option<Duration>) -> Self {
        Self { host, timeout }
    }

    /// Run one script, mirroring its output into the transcript.
    fn run_script(&self, label: &str, script: &str) -> Result<Output> {
        ui::verbose(&format!("$ {} ({})", label, self.host.display()));

        let mut cmd = build_powershell_command(&self.host, script);
        let output = run_command(&mut cmd, self.timeout)?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            if !line.trim().is_empty() {
                ui::verbose(&format!("  {}", line));
            }
        }
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            if !line.trim().is_empty() {
                ui::verbose(&format!("  ! {}", line));
            }
        }

        Ok(output)
    }

    fn run_checked(&self, label: &str, script: &str) -> Result<Output> {
        let output = self.run_script(label, script)?;
        if !output.status.success() {
            return Err(WinupError::SystemCommandFailed {
                command: label.to_string(),
                reason: failure_reason(&output),
            });
        }
        Ok(output)
    }

    fn run_operation(&self, op: Operation, id: &str) -> Result<()> {
        let script = scripts::operation(op, id)?;
        let label = format!("{} {}", op.cmdlet(), id);

        let failed = |reason: String| WinupError::OperationFailed {
            action: op.label().to_string(),
            id: id.to_string(),
            reason,
        };

        let output = self.run_script(&label, &script).map_err(|e| failed(e.to_string()))?;
        if !output.status.success() {
            return Err(failed(failure_reason(&output)));
        }

        let result = parse::parse_operation_result(&String::from_utf8_lossy(&output.stdout))
            .map_err(|e| failed(e.to_string()))?;

        if !result.is_ok() {
            return Err(failed(result.failure_reason()));
        }
        if result.reboot_required {
            ui::warning(&format!("{} requires a reboot to complete", id));
        }
        Ok(())
    }
}

fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let last = stderr.lines().rev().find(|l| !l.trim().is_empty());
    match (last, output.status.code()) {
        (Some(line), _) => sanitize_for_display(line),
        (None, Some(code)) => format!("exit code {}", code),
        (None, None) => "terminated by signal".to_string(),
    }
}

impl ClientBootstrap for WinGetClient {
    fn client_present(&self) -> Result<bool> {
        let output = self.run_checked("Get-Module -ListAvailable", &scripts::client_present())?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .is_some_and(|l| l.trim().eq_ignore_ascii_case("true")))
    }

    fn register_source(&self) -> Result<()> {
        self.run_checked("Install-PackageProvider", &scripts::register_source())
            .map(|_| ())
    }

    fn install_client(&self) -> Result<()> {
        self.run_checked("Install-Module", &scripts::install_client())
            .map(|_| ())
    }
}

impl PackageClient for WinGetClient {
    fn list_installed(&self) -> Result<Vec<Package>> {
        let output = self.run_checked("Get-WinGetPackage", &scripts::list_installed())?;
        parse::parse_package_list(&String::from_utf8_lossy(&output.stdout))
    }

    fn update(&self, id: &str) -> Result<()> {
        self.run_operation(Operation::Update, id)
    }

    fn uninstall(&self, id: &str) -> Result<()> {
        self.run_operation(Operation::Uninstall, id)
    }

    fn install(&self, id: &str) -> Result<()> {
        self.run_operation(Operation::Install, id)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// Fake PowerShell host: prints `stdout` and exits with `code`.
    fn fake_host(dir: &std::path::Path, stdout: &str, code: i32) -> PathBuf {
        let path = dir.join("pwsh");
        let script = format!("#!/bin/sh\ncat <<'EOF'\n{}\nEOF\nexit {}\n", stdout, code);
        fs::write(&path, script).expect("write host");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod");
        path
    }

    #[test]
    fn client_present_reads_boolean() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = WinGetClient::new(fake_host(dir.path(), "true", 0), None);
        assert!(client.client_present().expect("present"));

        let dir = tempfile::tempdir().expect("tempdir");
        let client = WinGetClient::new(fake_host(dir.path(), "false", 0), None);
        assert!(!client.client_present().expect("absent"));
    }

    #[test]
    fn non_ok_status_is_operation_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let host = fake_host(
            dir.path(),
            r#"{"Status":"InstallError","RebootRequired":false,"ErrorMessage":"1603"}"#,
            0,
        );
        let client = WinGetClient::new(host, None);

        let err = client.update("A.B").expect_err("should fail");
        match err {
            WinupError::OperationFailed { action, id, reason } => {
                assert_eq!(action, "Update");
                assert_eq!(id, "A.B");
                assert!(reason.contains("InstallError"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_zero_exit_is_operation_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = WinGetClient::new(fake_host(dir.path(), "", 1), None);
        assert!(client.install("A.B").is_err());
        assert!(client.register_source().is_err());
    }

    #[test]
    fn ok_status_is_success() {
        let dir = tempfile::tempdir().expect("tempdir");
        let host = fake_host(dir.path(), r#"{"Status":"Ok","RebootRequired":false}"#, 0);
        let client = WinGetClient::new(host, None);
        assert!(client.uninstall("A.B").is_ok());
    }

    #[test]
    fn list_installed_parses_packages() {
        let dir = tempfile::tempdir().expect("tempdir");
        let host = fake_host(
            dir.path(),
            r#"[{"Name":"Foo","Id":"A.B","InstalledVersion":"1.0","AvailableVersion":"1.1","IsUpdateAvailable":true}]"#,
            0,
        );
        let client = WinGetClient::new(host, None);
        let pkgs = client.list_installed().expect("list");
        assert_eq!(pkgs.len(), 1);
        assert_eq!(pkgs[0].name, "Foo");
    }
}
