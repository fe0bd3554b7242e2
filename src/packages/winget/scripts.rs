//! PowerShell snippets for the WinGet client module.
//!
//! Every script sets `$ErrorActionPreference = 'Stop'` so a failing cmdlet
//! exits non-zero, and emits at most one compact JSON document on stdout.

use crate::error::Result;
use crate::project_identity::{
    CLIENT_MODULE, SOURCE_PROVIDER, SOURCE_PROVIDER_MIN_VERSION, SOURCE_REPOSITORY,
};
use crate::utils::sanitize::{ps_quote, validate_package_id};

const PRELUDE: &str = "$ErrorActionPreference = 'Stop'; $ProgressPreference = 'SilentlyContinue';";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Update,
    Uninstall,
    Install,
}

impl Operation {
    pub fn cmdlet(self) -> &'static str {
        match self {
            Self::Update => "Update-WinGetPackage",
            Self::Uninstall => "Uninstall-WinGetPackage",
            Self::Install => "Install-WinGetPackage",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Update => "Update",
            Self::Uninstall => "Uninstall",
            Self::Install => "Install",
        }
    }

    /// Silent and forced everywhere; machine-wide scope where the cmdlet
    /// accepts one (uninstall removes whatever scope is installed).
    fn flags(self) -> &'static str {
        match self {
            Self::Update | Self::Install => "-Mode Silent -Scope System -Force",
            Self::Uninstall => "-Mode Silent -Force",
        }
    }
}

pub fn client_present() -> String {
    format!(
        "{PRELUDE} if (Get-Module -ListAvailable -Name {module}) {{ 'true' }} else {{ 'false' }}",
        module = ps_quote(CLIENT_MODULE),
    )
}

pub fn register_source() -> String {
    format!(
        "{PRELUDE} Install-PackageProvider -Name {provider} -MinimumVersion {version} -Force -Scope AllUsers | Out-Null; \
         Set-PSRepository -Name {repo} -InstallationPolicy Trusted",
        provider = ps_quote(SOURCE_PROVIDER),
        version = ps_quote(SOURCE_PROVIDER_MIN_VERSION),
        repo = ps_quote(SOURCE_REPOSITORY),
    )
}

pub fn install_client() -> String {
    format!(
        "{PRELUDE} Install-Module -Name {module} -Repository {repo} -Force -AllowClobber -Scope AllUsers",
        module = ps_quote(CLIENT_MODULE),
        repo = ps_quote(SOURCE_REPOSITORY),
    )
}

pub fn list_installed() -> String {
    format!(
        "{PRELUDE} Import-Module {module}; \
         $pkgs = @(Get-WinGetPackage | ForEach-Object {{ [pscustomobject]@{{ \
         Name = [string]$_.Name; Id = [string]$_.Id; \
         InstalledVersion = [string]$_.InstalledVersion; \
         AvailableVersion = [string]($_.AvailableVersions | Select-Object -First 1); \
         IsUpdateAvailable = [bool]$_.IsUpdateAvailable }} }}); \
         ConvertTo-Json -InputObject $pkgs -Compress -Depth 3",
        module = ps_quote(CLIENT_MODULE),
    )
}

pub fn operation(op: Operation, id: &str) -> Result<String> {
    validate_package_id(id)?;

    Ok(format!(
        "{PRELUDE} Import-Module {module}; \
         $r = {cmdlet} -Id {id} -MatchOption Equals {flags}; \
         [pscustomobject]@{{ Status = [string]$r.Status; RebootRequired = [bool]$r.RebootRequired; \
         ErrorMessage = $(if ($r.ExtendedErrorCode) {{ [string]$r.ExtendedErrorCode.Message }} else {{ $null }}) }} \
         | ConvertTo-Json -Compress",
        module = ps_quote(CLIENT_MODULE),
        cmdlet = op.cmdlet(),
        id = ps_quote(id),
        flags = op.flags(),
    ))
}
