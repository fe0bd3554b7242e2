//! # Package Manager Client
//!
//! The update run talks to the package manager through two traits:
//!
//! - [`ClientBootstrap`]: check for the client and install it when missing
//! - [`PackageClient`]: list installed packages, update, uninstall, install
//!
//! [`WinGetClient`] implements both by driving the `Microsoft.WinGet.Client`
//! PowerShell module. Each call runs one short script and reads a compact
//! JSON document back from stdout.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use winup::packages::{PackageClient, WinGetClient};
//! use winup::utils::platform::resolve_powershell;
//!
//! let host = resolve_powershell(None)?;
//! let client = WinGetClient::new(host, None);
//! for pkg in client.list_installed()?.iter().filter(|p| p.is_update_available) {
//!     client.update(&pkg.id)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod traits;
pub mod winget;

pub use traits::{ClientBootstrap, PackageClient};
pub use winget::WinGetClient;
