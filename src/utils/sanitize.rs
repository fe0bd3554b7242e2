//! Input sanitization utilities for security
//!
//! Package identifiers are interpolated into PowerShell scripts, so every
//! id is validated against a conservative character set and then quoted
//! as a single-quoted literal.

use crate::error::{Result, WinupError};
use regex::Regex;
use std::sync::LazyLock;

/// WinGet identifiers: publisher and product segments joined by dots
/// (`Mozilla.Firefox`, `Microsoft.VisualStudioCode.Insiders`, `7zip.7zip`).
static SAFE_PACKAGE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._+-]*$").expect("Invalid regex pattern"));

const MAX_ID_LEN: usize = 256;

/// Validate a package identifier is safe to embed in a script
///
/// # Security
/// Rejects anything outside `[A-Za-z0-9._+-]` so ids such as
/// `Foo'; Remove-Item C:\ -Recurse` never reach the shell.
pub fn validate_package_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(WinupError::InvalidPackageId {
            id: id.to_string(),
            reason: "identifier cannot be empty".to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(WinupError::InvalidPackageId {
            id: id.chars().take(50).collect(),
            reason: format!("identifier too long (max {} chars)", MAX_ID_LEN),
        });
    }

    if !SAFE_PACKAGE_ID.is_match(id) {
        return Err(WinupError::InvalidPackageId {
            id: id.to_string(),
            reason: "identifier contains invalid characters".to_string(),
        });
    }

    if id.contains("..") {
        return Err(WinupError::InvalidPackageId {
            id: id.to_string(),
            reason: "identifier cannot contain '..'".to_string(),
        });
    }

    Ok(())
}

/// Quote a value as a PowerShell single-quoted string literal.
pub fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Truncate command output for log lines
pub fn sanitize_for_display(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.chars().count() > 200 {
        let head: String = trimmed.chars().take(200).collect();
        format!("{}...", head)
    } else {
        trimmed.to_string()
    }
}
