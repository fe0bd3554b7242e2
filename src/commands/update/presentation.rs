use crate::core::types::{Package, PackageAction, UpdateReport};
use crate::ui as output;

pub(super) fn print_pending(packages: &[Package]) {
    output::info(&format!("{} update(s) available:", packages.len()));
    for pkg in packages {
        let versions = match (&pkg.installed_version, &pkg.available_version) {
            (Some(from), Some(to)) => format!("{} -> {}", from, to),
            (None, Some(to)) => format!("-> {}", to),
            (Some(from), None) => from.clone(),
            (None, None) => String::new(),
        };
        output::indent(format!("- {} {}", pkg, versions).trim_end(), 1);
    }
}

pub(super) fn print_summary(report: &UpdateReport) {
    if report.is_up_to_date() {
        return;
    }

    let counts = report.counts();
    output::separator();
    output::header("Summary");

    if report.dry_run {
        output::keyval("Pending", &counts.pending.to_string());
        output::info("Dry run: no changes were made");
        return;
    }

    output::keyval("Updated", &counts.updated.to_string());
    output::keyval("Reinstalled", &counts.reinstalled.to_string());
    output::keyval("Failed", &counts.failed.to_string());
    output::keyval("Left uninstalled", &counts.left_uninstalled.to_string());
    if counts.skipped > 0 {
        output::keyval("Skipped", &counts.skipped.to_string());
    }

    for failed in report.failures() {
        output::indent(&format!("- {} ({}): {}", failed.name, failed.id, failed.action), 1);
    }

    let broken: Vec<&str> = report
        .packages
        .iter()
        .filter(|r| r.action == PackageAction::LeftUninstalled)
        .map(|r| r.id.as_str())
        .collect();
    if !broken.is_empty() {
        output::warning(&format!(
            "Not installed anymore, reinstall manually: {}",
            broken.join(", ")
        ));
    }
}

/// (warnings, errors) for the machine-readable envelope
pub(super) fn machine_messages(report: &UpdateReport) -> (Vec<String>, Vec<String>) {
    let warnings = report
        .packages
        .iter()
        .filter(|r| r.action == PackageAction::Skipped)
        .map(|r| format!("{}: skipped", r.id))
        .collect();
    let errors = report
        .failures()
        .map(|r| match &r.detail {
            Some(detail) => format!("{}: {}: {}", r.id, r.action, detail),
            None => format!("{}: {}", r.id, r.action),
        })
        .collect();
    (warnings, errors)
}
