use crate::core::types::Package;
use crate::error::{Result, WinupError};
use serde::Deserialize;

/// `ConvertTo-Json` collapses one-element arrays unless forced, so accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Package>),
    One(Box<Package>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationResult {
    pub status: String,
    #[serde(default)]
    pub reboot_required: bool,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl OperationResult {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }

    pub fn failure_reason(&self) -> String {
        match self.error_message.as_deref().map(str::trim) {
            Some(msg) if !msg.is_empty() => format!("status {}: {}", self.status, msg),
            _ => format!("status {}", self.status),
        }
    }
}

/// Last JSON-looking line of stdout; module import chatter may precede it.
fn json_payload(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .map(str::trim)
        .rev()
        .find(|line| line.starts_with('{') || line.starts_with('[') || *line == "null")
}

pub fn parse_package_list(stdout: &str) -> Result<Vec<Package>> {
    let Some(payload) = json_payload(stdout) else {
        return Ok(Vec::new());
    };
    if payload == "null" {
        return Ok(Vec::new());
    }

    let parsed: OneOrMany =
        serde_json::from_str(payload).map_err(|e| WinupError::ParseError {
            what: "package list".to_string(),
            message: e.to_string(),
        })?;

    let packages = match parsed {
        OneOrMany::Many(list) => list,
        OneOrMany::One(pkg) => vec![*pkg],
    };

    Ok(packages.into_iter().map(normalize).collect())
}

pub fn parse_operation_result(stdout: &str) -> Result<OperationResult> {
    let payload = json_payload(stdout).ok_or_else(|| WinupError::ParseError {
        what: "operation result".to_string(),
        message: "no JSON output".to_string(),
    })?;

    serde_json::from_str(payload).map_err(|e| WinupError::ParseError {
        what: "operation result".to_string(),
        message: e.to_string(),
    })
}

fn normalize(mut pkg: Package) -> Package {
    pkg.installed_version = pkg.installed_version.filter(|v| !v.trim().is_empty());
    pkg.available_version = pkg.available_version.filter(|v| !v.trim().is_empty());
    pkg
}
