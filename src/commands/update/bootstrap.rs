use crate::core::types::BootstrapOutcome;
use crate::error::{Result, WinupError};
use crate::packages::ClientBootstrap;
use crate::project_identity::{CLIENT_MODULE, SOURCE_PROVIDER};
use crate::ui as output;

/// Make sure the package manager client is installed.
///
/// Does nothing when the client is already present. Otherwise registers the
/// package source and installs the client; the first failing step ends the
/// bootstrap with [`WinupError::Bootstrap`].
pub fn ensure_client<B>(client: &B) -> Result<BootstrapOutcome>
where
    B: ClientBootstrap + ?Sized,
{
    let present = client
        .client_present()
        .map_err(|e| WinupError::bootstrap(format!("check for {}", CLIENT_MODULE), e))?;

    if present {
        output::verbose(&format!("{} is installed", CLIENT_MODULE));
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    output::warning(&format!("{} is not installed", CLIENT_MODULE));

    output::info(&format!("Registering the {} package provider...", SOURCE_PROVIDER));
    client.register_source().map_err(|e| {
        WinupError::bootstrap(format!("register the {} package provider", SOURCE_PROVIDER), e)
    })?;

    output::info(&format!("Installing {}...", CLIENT_MODULE));
    client
        .install_client()
        .map_err(|e| WinupError::bootstrap(format!("install {}", CLIENT_MODULE), e))?;

    output::success(&format!("{} installed", CLIENT_MODULE));
    Ok(BootstrapOutcome::Installed)
}
