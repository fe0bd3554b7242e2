use crate::core::types::Package;
use crate::error::Result;
use crate::packages::PackageClient;

/// Installed packages with an update available, in the order the package
/// manager reported them.
pub fn pending_updates<C>(client: &C) -> Result<Vec<Package>>
where
    C: PackageClient + ?Sized,
{
    Ok(client
        .list_installed()?
        .into_iter()
        .filter(|pkg| pkg.is_update_available)
        .collect())
}
