//! CLI subcommand implementations.

use std::time::Duration;

use adreport_client::{AdSenseClient, CredentialStore, OAuthClient};

use crate::config::{ApiSettings, CliConfig};
use crate::error::{CliError, CliResult};

pub mod accounts;
pub mod auth;
pub mod config;
pub mod report;

/// Returns the API settings, erroring when the `[api]` section is missing.
fn api_settings(config: &CliConfig) -> CliResult<&ApiSettings> {
    config.api.as_ref().ok_or_else(|| {
        CliError::Config(format!(
            "no [api] section in {}",
            CliConfig::default_path().display()
        ))
    })
}

/// Opens the credential store configured for this application.
fn credential_store(api: &ApiSettings) -> CliResult<CredentialStore> {
    let key = api.resolve_credential_key().map_err(CliError::Config)?;
    Ok(CredentialStore::new(CredentialStore::default_dir(), key))
}

/// Builds an API client with a fresh access token.
///
/// Loads the cached refresh token, exchanges it for an access token, and
/// returns a ready-to-use client. A missing cached credential asks the user
/// to run `adreport auth import` first.
async fn authenticated_client(config: &CliConfig) -> CliResult<AdSenseClient> {
    let api = api_settings(config)?;
    let (client_id, client_secret) = api.resolve_credentials().map_err(CliError::Config)?;
    let store = credential_store(api)?;

    let credential = store.get(api.storage_name()).ok_or_else(|| {
        CliError::AuthRequired(format!(
            "no cached credential named '{}'; run `adreport auth import` first",
            api.storage_name()
        ))
    })?;

    let timeout = Duration::from_secs(config.report.timeout);
    let oauth = OAuthClient::new(client_id, client_secret, timeout);
    let (access_token, _expires_in) = oauth
        .refresh_access_token(&credential.refresh_token)
        .await?;

    Ok(AdSenseClient::new(access_token, timeout))
}
