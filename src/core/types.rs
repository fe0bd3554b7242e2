use serde::{Deserialize, Serialize};
use std::fmt;

// One installed application as reported by the package manager.
// Produced fresh by every query; the update flag may go stale between
// the query and the update attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Package {
    #[serde(default)]
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub installed_version: Option<String>,
    #[serde(default)]
    pub available_version: Option<String>,
    #[serde(default)]
    pub is_update_available: bool,
}

impl Package {
    /// Name for display; falls back to the id when the manager reports none.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.id)
    }
}

/// Terminal status of one package in a run. Exactly one per package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageAction {
    /// In-place update succeeded
    Updated,
    /// Update failed; uninstall and install both succeeded
    Reinstalled,
    /// Update failed and uninstall failed; old version still installed
    ReinstallFailed,
    /// Uninstall succeeded but install failed; package is gone
    LeftUninstalled,
    /// Dry run: update available, nothing applied
    Pending,
    /// Run interrupted before this package was reached, or while its
    /// update was running (no fallback attempted)
    Skipped,
}

impl PackageAction {
    pub fn is_failure(self) -> bool {
        matches!(self, Self::ReinstallFailed | Self::LeftUninstalled)
    }
}

impl fmt::Display for PackageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Updated => "updated",
            Self::Reinstalled => "reinstalled",
            Self::ReinstallFailed => "reinstall failed",
            Self::LeftUninstalled => "left uninstalled",
            Self::Pending => "pending",
            Self::Skipped => "skipped",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    pub id: String,
    pub name: String,
    pub installed_version: Option<String>,
    pub available_version: Option<String>,
    pub action: PackageAction,
    pub detail: Option<String>,
}

impl PackageReport {
    pub fn new(package: &Package, action: PackageAction, detail: Option<String>) -> Self {
        Self {
            id: package.id.clone(),
            name: package.display_name().to_string(),
            installed_version: package.installed_version.clone(),
            available_version: package.available_version.clone(),
            action,
            detail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapOutcome {
    AlreadyPresent,
    Installed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportCounts {
    pub updated: usize,
    pub reinstalled: usize,
    pub failed: usize,
    pub left_uninstalled: usize,
    pub pending: usize,
    pub skipped: usize,
}

/// Everything one run did, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub bootstrap: BootstrapOutcome,
    pub dry_run: bool,
    pub packages: Vec<PackageReport>,
}

impl UpdateReport {
    pub fn counts(&self) -> ReportCounts {
        let mut counts = ReportCounts::default();
        for report in &self.packages {
            match report.action {
                PackageAction::Updated => counts.updated += 1,
                PackageAction::Reinstalled => counts.reinstalled += 1,
                PackageAction::ReinstallFailed => counts.failed += 1,
                PackageAction::LeftUninstalled => counts.left_uninstalled += 1,
                PackageAction::Pending => counts.pending += 1,
                PackageAction::Skipped => counts.skipped += 1,
            }
        }
        counts
    }

    pub fn is_up_to_date(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &PackageReport> {
        self.packages.iter().filter(|r| r.action.is_failure())
    }
}
