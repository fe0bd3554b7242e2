use crate::core::types::{Package, PackageAction, PackageReport};
use crate::error::WinupError;
use crate::packages::PackageClient;
use crate::ui as output;

/// Bring each package to its latest version, one at a time, in order.
///
/// A failed update falls back to a single uninstall + install. Failures
/// never stop the loop; every package ends with exactly one report.
pub fn apply_updates<C>(client: &C, packages: &[Package]) -> Vec<PackageReport>
where
    C: PackageClient + ?Sized,
{
    apply_updates_until(client, packages, output::is_interrupted)
}

/// Same as [`apply_updates`]; once `cancelled` returns true the remaining
/// packages are reported as skipped without touching the package manager.
/// A package whose update failed after cancellation is skipped as well and
/// never enters the uninstall + install fallback.
pub fn apply_updates_until<C, F>(client: &C, packages: &[Package], cancelled: F) -> Vec<PackageReport>
where
    C: PackageClient + ?Sized,
    F: Fn() -> bool,
{
    let total = packages.len();
    let mut reports = Vec::with_capacity(total);

    for (idx, pkg) in packages.iter().enumerate() {
        if cancelled() {
            output::warning(&format!("Skipped {} (run cancelled)", pkg.display_name()));
            reports.push(PackageReport::new(pkg, PackageAction::Skipped, None));
            continue;
        }

        output::info(&format!(
            "[{}/{}] Updating {}{}",
            idx + 1,
            total,
            pkg,
            version_change(pkg)
        ));
        reports.push(apply_one(client, pkg, &cancelled));
    }

    reports
}

fn apply_one<C, F>(client: &C, pkg: &Package, cancelled: &F) -> PackageReport
where
    C: PackageClient + ?Sized,
    F: Fn() -> bool,
{
    let name = pkg.display_name();

    let update_err = match client.update(&pkg.id) {
        Ok(()) => {
            output::success(&format!("{} updated to the latest version.", name));
            return PackageReport::new(pkg, PackageAction::Updated, None);
        }
        Err(e) => e,
    };

    // Nothing was executed; a reinstall would be rejected the same way.
    if let WinupError::InvalidPackageId { reason, .. } = &update_err {
        output::error(&format!("Cannot update {}: {}", name, reason));
        return PackageReport::new(pkg, PackageAction::ReinstallFailed, Some(update_err.to_string()));
    }

    // The failure may be the interrupted call itself; never uninstall then.
    if cancelled() {
        output::warning(&format!(
            "Skipped {} (run cancelled during update: {})",
            name, update_err
        ));
        return PackageReport::new(pkg, PackageAction::Skipped, Some(update_err.to_string()));
    }

    output::warning(&format!("Failed to update {}: {}", name, update_err));
    output::info(&format!("Attempting to reinstall {}...", name));

    if let Err(e) = client.uninstall(&pkg.id) {
        output::error(&format!("Failed to reinstall {}: {}", name, e));
        return PackageReport::new(pkg, PackageAction::ReinstallFailed, Some(e.to_string()));
    }

    match client.install(&pkg.id) {
        Ok(()) => {
            output::success(&format!("{} reinstalled successfully.", name));
            PackageReport::new(pkg, PackageAction::Reinstalled, Some(update_err.to_string()))
        }
        Err(e) => {
            output::error(&format!(
                "{} was uninstalled but could not be reinstalled: {}",
                name, e
            ));
            PackageReport::new(pkg, PackageAction::LeftUninstalled, Some(e.to_string()))
        }
    }
}

fn version_change(pkg: &Package) -> String {
    match (&pkg.installed_version, &pkg.available_version) {
        (Some(from), Some(to)) => format!(" {} -> {}", from, to),
        (None, Some(to)) => format!(" -> {}", to),
        _ => String::new(),
    }
}
