use crate::error::{Result, WinupError};
use std::io::Read;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Execute a command non-interactively, capturing stdout and stderr.
///
/// With `timeout: None` the call blocks until the child exits; package
/// installs can legitimately take a long time.
pub fn run_command(cmd: &mut Command, timeout: Option<Duration>) -> Result<Output> {
    let cmd_debug = cmd.get_program().to_string_lossy().into_owned();

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| WinupError::SystemCommandFailed {
        command: cmd_debug.clone(),
        reason: e.to_string(),
    })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| WinupError::SystemCommandFailed {
            command: cmd_debug.clone(),
            reason: "Failed to capture stdout".to_string(),
        })?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| WinupError::SystemCommandFailed {
            command: cmd_debug.clone(),
            reason: "Failed to capture stderr".to_string(),
        })?;

    let stdout_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stdout).read_to_end(&mut buf);
        buf
    });
    let stderr_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stderr).read_to_end(&mut buf);
        buf
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if let Some(limit) = timeout
                    && start.elapsed() > limit
                {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_thread.join();
                    let _ = stderr_thread.join();
                    return Err(WinupError::SystemCommandFailed {
                        command: cmd_debug,
                        reason: format!("Command timed out after {} seconds", limit.as_secs()),
                    });
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(WinupError::SystemCommandFailed {
                    command: cmd_debug,
                    reason: e.to_string(),
                });
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}
