use crate::core::types::Package;
use crate::error::Result;

/// Steps needed to make the package manager client usable.
pub trait ClientBootstrap {
    /// Whether the client is already installed
    fn client_present(&self) -> Result<bool>;

    /// Register the package source the client is installed from
    fn register_source(&self) -> Result<()>;

    /// Install the client itself
    fn install_client(&self) -> Result<()>;
}

/// Package manager operations used by an update run.
///
/// Every mutating call returns `Ok(())` only when the package manager
/// reported success; anything else is an error carrying the detail.
pub trait PackageClient {
    /// All installed packages with their update-available flag
    fn list_installed(&self) -> Result<Vec<Package>>;

    /// Update in place (silent, machine scope, forced)
    fn update(&self, id: &str) -> Result<()>;

    fn uninstall(&self, id: &str) -> Result<()>;

    fn install(&self, id: &str) -> Result<()>;
}
