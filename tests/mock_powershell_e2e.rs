#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MOCK_PWSH: &str = r#"#!/usr/bin/env bash
set -u
for script; do :; done
log="${MOCK_LOG:-/dev/null}"
id=$(printf '%s' "$script" | sed -n "s/.*-Id '\([^']*\)'.*/\1/p")

contains() {
  case " $1 " in
    *" $2 "*) return 0 ;;
  esac
  return 1
}

op_result() {
  if contains "$1" "$id"; then
    echo '{"Status":"InstallError","RebootRequired":false,"ErrorMessage":"mock failure"}'
  else
    echo '{"Status":"Ok","RebootRequired":false,"ErrorMessage":null}'
  fi
}

case "$script" in
  *"Get-Module -ListAvailable"*)
    echo "client_present" >> "$log"
    echo "${MOCK_CLIENT_PRESENT:-true}"
    ;;
  *Install-PackageProvider*)
    echo "register_source" >> "$log"
    if [ -n "${MOCK_FAIL_REGISTER:-}" ]; then
      echo "No match was found for the specified search criteria" >&2
      exit 1
    fi
    ;;
  *Install-Module*)
    echo "install_client" >> "$log"
    ;;
  *Get-WinGetPackage*)
    echo "list_installed" >> "$log"
    printf '%s\n' "${MOCK_PACKAGES:-[]}"
    ;;
  *Uninstall-WinGetPackage*)
    echo "uninstall:$id" >> "$log"
    op_result "${MOCK_FAIL_UNINSTALL:-}"
    ;;
  *Update-WinGetPackage*)
    echo "update:$id" >> "$log"
    op_result "${MOCK_FAIL_UPDATE:-}"
    ;;
  *Install-WinGetPackage*)
    echo "install:$id" >> "$log"
    op_result "${MOCK_FAIL_INSTALL:-}"
    ;;
  *)
    echo "unexpected script" >&2
    exit 2
    ;;
esac
"#;

const FOO_BAR: &str = r#"[{"Name":"Foo","Id":"A.B","InstalledVersion":"1.0","AvailableVersion":"1.1","IsUpdateAvailable":true},{"Name":"Quiet","Id":"Q.Q","InstalledVersion":"3.0","AvailableVersion":"","IsUpdateAvailable":false},{"Name":"Bar","Id":"C.D","InstalledVersion":"2.0","AvailableVersion":"2.5","IsUpdateAvailable":true}]"#;

struct TestEnv {
    _tmp: TempDir,
    home_dir: PathBuf,
    log_dir: PathBuf,
    call_log: PathBuf,
    pwsh: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path().to_path_buf();

        let home_dir = root.join("home");
        let log_dir = root.join("logs");
        let bin_dir = root.join("bin");
        fs::create_dir_all(&home_dir).expect("mkdir home");
        fs::create_dir_all(&bin_dir).expect("mkdir bin");

        let pwsh = bin_dir.join("pwsh");
        fs::write(&pwsh, MOCK_PWSH).expect("write mock pwsh");
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&pwsh).expect("metadata").permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&pwsh, perms).expect("chmod");
        }

        Self {
            call_log: root.join("calls.log"),
            _tmp: tmp,
            home_dir,
            log_dir,
            pwsh,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_winup"));
        cmd.env("HOME", &self.home_dir)
            .env("WINUP_POWERSHELL", &self.pwsh)
            .env("WINUP_LOG_DIR", &self.log_dir)
            .env("MOCK_LOG", &self.call_log)
            .env("NO_COLOR", "1")
            .env_remove("WINUP_TIMEOUT");
        cmd
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.call_log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn transcript(&self) -> String {
        read_single_log(&self.log_dir)
    }
}

fn read_single_log(dir: &Path) -> String {
    let entries: Vec<_> = fs::read_dir(dir)
        .expect("log dir exists")
        .map(|e| e.expect("entry").path())
        .collect();
    assert_eq!(entries.len(), 1, "expected one transcript, got {:?}", entries);
    let name = entries[0].file_name().expect("name").to_string_lossy().into_owned();
    assert!(name.starts_with("winup_") && name.ends_with(".log"), "{name}");
    fs::read_to_string(&entries[0]).expect("read transcript")
}

#[test]
fn up_to_date_run_skips_updates() {
    let env = TestEnv::new();

    env.cmd()
        .env(
            "MOCK_PACKAGES",
            r#"[{"Name":"Foo","Id":"A.B","IsUpdateAvailable":false}]"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("All applications are up to date."));

    assert_eq!(env.calls(), vec!["client_present", "list_installed"]);

    let transcript = env.transcript();
    assert_eq!(transcript.matches("All applications are up to date.").count(), 1);
    assert!(transcript.contains("Winup transcript start"));
    assert!(transcript.contains("Winup transcript end"));
}

#[test]
fn successful_updates_follow_enumeration_order() {
    let env = TestEnv::new();

    env.cmd().env("MOCK_PACKAGES", FOO_BAR).assert().success();

    assert_eq!(
        env.calls(),
        vec!["client_present", "list_installed", "update:A.B", "update:C.D"]
    );

    let transcript = env.transcript();
    assert!(transcript.contains("Foo updated to the latest version."));
    assert!(transcript.contains("Bar updated to the latest version."));
    assert!(!transcript.contains("Quiet updated"));
}

#[test]
fn failed_update_is_reinstalled() {
    let env = TestEnv::new();

    env.cmd()
        .env("MOCK_PACKAGES", FOO_BAR)
        .env("MOCK_FAIL_UPDATE", "A.B")
        .assert()
        .success();

    assert_eq!(
        env.calls(),
        vec![
            "client_present",
            "list_installed",
            "update:A.B",
            "uninstall:A.B",
            "install:A.B",
            "update:C.D"
        ]
    );

    let transcript = env.transcript();
    let attempt = transcript.find("Attempting to reinstall Foo...").expect("attempt line");
    let done = transcript.find("Foo reinstalled successfully.").expect("success line");
    assert!(attempt < done);
}

#[test]
fn failed_reinstall_does_not_abort_run() {
    let env = TestEnv::new();

    env.cmd()
        .env("MOCK_PACKAGES", FOO_BAR)
        .env("MOCK_FAIL_UPDATE", "A.B")
        .env("MOCK_FAIL_UNINSTALL", "A.B")
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to reinstall Foo"));

    assert_eq!(
        env.calls(),
        vec![
            "client_present",
            "list_installed",
            "update:A.B",
            "uninstall:A.B",
            "update:C.D"
        ]
    );
    assert!(env.transcript().contains("Bar updated to the latest version."));
}

#[test]
fn install_failure_after_uninstall_is_reported_as_broken() {
    let env = TestEnv::new();

    env.cmd()
        .env("MOCK_PACKAGES", FOO_BAR)
        .env("MOCK_FAIL_UPDATE", "C.D")
        .env("MOCK_FAIL_INSTALL", "C.D")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Bar was uninstalled but could not be reinstalled",
        ));

    let transcript = env.transcript();
    assert!(transcript.contains("Not installed anymore, reinstall manually: C.D"));
}

#[test]
fn missing_client_is_installed_first() {
    let env = TestEnv::new();

    env.cmd()
        .env("MOCK_CLIENT_PRESENT", "false")
        .env("MOCK_PACKAGES", "[]")
        .assert()
        .success();

    assert_eq!(
        env.calls(),
        vec![
            "client_present",
            "register_source",
            "install_client",
            "list_installed"
        ]
    );
}

#[test]
fn source_registration_failure_aborts_before_query() {
    let env = TestEnv::new();

    env.cmd()
        .env("MOCK_CLIENT_PRESENT", "false")
        .env("MOCK_FAIL_REGISTER", "1")
        .env("MOCK_PACKAGES", FOO_BAR)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Bootstrap failed"));

    assert_eq!(env.calls(), vec!["client_present", "register_source"]);

    let transcript = env.transcript();
    assert!(transcript.contains("Update run aborted"));
    assert!(transcript.contains("Winup transcript end"));
}

#[test]
fn dry_run_changes_nothing() {
    let env = TestEnv::new();

    env.cmd()
        .arg("--dry-run")
        .env("MOCK_PACKAGES", FOO_BAR)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 update(s) available"));

    assert_eq!(env.calls(), vec!["client_present", "list_installed"]);
}

#[test]
fn json_report_lists_outcomes() {
    let env = TestEnv::new();

    let assert = env
        .cmd()
        .args(["--output", "json"])
        .env("MOCK_PACKAGES", FOO_BAR)
        .env("MOCK_FAIL_UPDATE", "A.B")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is one JSON document");
    assert_eq!(json["version"], "v1");
    assert_eq!(json["command"], "update");
    assert_eq!(json["ok"], true);
    assert_eq!(json["data"]["packages"][0]["id"], "A.B");
    assert_eq!(json["data"]["packages"][0]["action"], "reinstalled");
    assert_eq!(json["data"]["packages"][1]["action"], "updated");

    assert!(env.transcript().contains("Foo reinstalled successfully."));
}

#[test]
fn transcript_defaults_to_home_directory() {
    let env = TestEnv::new();

    env.cmd()
        .env_remove("WINUP_LOG_DIR")
        .env("MOCK_PACKAGES", "[]")
        .assert()
        .success();

    let transcript = read_single_log(&env.home_dir.join("winup-logs"));
    assert!(transcript.contains("All applications are up to date."));
}
