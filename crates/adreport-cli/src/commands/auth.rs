//! Credential management commands.
//!
//! Interactive consent is out of scope for this tool; `auth import` stores a
//! refresh token obtained elsewhere (OAuth playground, a one-off consent
//! script) so the other subcommands can mint access tokens from it.

use adreport_client::Credential;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Stores a refresh token under the configured storage name.
pub fn import(config: &CliConfig, refresh_token: String, scopes: Vec<String>) -> CliResult<()> {
    let api = super::api_settings(config)?;
    let store = super::credential_store(api)?;

    let credential = Credential::new(scopes, refresh_token);
    store.set(api.storage_name(), &credential)?;

    println!(
        "Stored credential at {}",
        store.path_for(api.storage_name()).display()
    );
    Ok(())
}

/// Shows whether a credential is cached.
pub fn status(config: &CliConfig) -> CliResult<()> {
    let api = super::api_settings(config)?;
    let store = super::credential_store(api)?;

    match store.get(api.storage_name()) {
        Some(credential) => {
            println!("Cached credential: {}", api.storage_name());
            if credential.scopes.is_empty() {
                println!("  scopes: (none recorded)");
            } else {
                for scope in &credential.scopes {
                    println!("  scope: {}", scope);
                }
            }
        }
        None => println!("No cached credential named '{}'.", api.storage_name()),
    }
    Ok(())
}

/// Removes the cached credential.
pub fn clear(config: &CliConfig) -> CliResult<()> {
    let api = super::api_settings(config)?;
    let store = super::credential_store(api)?;

    store.clear(api.storage_name())?;
    println!("Cleared credential '{}'.", api.storage_name());
    Ok(())
}
