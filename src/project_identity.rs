//! Central project identity contract.
//!
//! Single source of truth for runtime identity values (names, env prefix,
//! log locations).

pub const DISPLAY_NAME: &str = "Winup";
pub const BINARY_NAME: &str = "winup";
pub const ENV_PREFIX: &str = "WINUP";
pub const LOG_DIR_NAME: &str = "winup-logs";
pub const TRANSCRIPT_PREFIX: &str = "winup";

/// PowerShell module that provides the WinGet cmdlets.
pub const CLIENT_MODULE: &str = "Microsoft.WinGet.Client";
/// Package provider registered before the client module can be installed.
pub const SOURCE_PROVIDER: &str = "NuGet";
pub const SOURCE_PROVIDER_MIN_VERSION: &str = "2.8.5.201";
pub const SOURCE_REPOSITORY: &str = "PSGallery";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}
