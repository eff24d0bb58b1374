//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/adreport/config.toml` by default.
//!
//! Credential values (`client_id`, `client_secret`, `credential_key`)
//! support secret references:
//! - `pass::path/in/store` — resolved via `pass show`
//! - `env::VAR_NAME` — resolved from the environment
//! - plain text — used as-is

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::secret;

/// Configuration for the adreport CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// OAuth application settings.
    pub api: Option<ApiSettings>,

    /// Debug mode.
    pub debug: bool,

    /// Report fetching settings.
    #[serde(default)]
    pub report: ReportSettings,
}

/// OAuth application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// OAuth client id (supports secret references).
    pub client_id: Option<String>,

    /// OAuth client secret (supports secret references).
    pub client_secret: Option<String>,

    /// Storage name for the cached credential file (`<name>.auth`).
    pub storage_name: Option<String>,

    /// Key used to obfuscate the credential file (supports secret
    /// references). Defaults to the client id.
    pub credential_key: Option<String>,
}

impl ApiSettings {
    /// Resolves the client id and secret, following secret references.
    pub fn resolve_credentials(&self) -> Result<(String, String), String> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or_else(|| "api.client_id is not set".to_string())?;
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or_else(|| "api.client_secret is not set".to_string())?;

        Ok((secret::resolve(client_id)?, secret::resolve(client_secret)?))
    }

    /// Returns the storage name, defaulting to `adsense`.
    pub fn storage_name(&self) -> &str {
        self.storage_name.as_deref().unwrap_or("adsense")
    }

    /// Resolves the credential-file key, falling back to the client id.
    pub fn resolve_credential_key(&self) -> Result<String, String> {
        match self.credential_key.as_deref() {
            Some(key) => secret::resolve(key),
            None => {
                let client_id = self
                    .client_id
                    .as_deref()
                    .ok_or_else(|| "api.client_id is not set".to_string())?;
                secret::resolve(client_id)
            }
        }
    }
}

/// Report fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Records requested per page.
    pub page_size: u64,

    /// Hard cap on total rows fetched per report.
    pub row_limit: u64,

    /// HTTP request timeout in seconds.
    pub timeout: u64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            page_size: 50,
            row_limit: 5000,
            timeout: 30,
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("adreport")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CliConfig::default();
        assert!(config.api.is_none());
        assert!(!config.debug);
        assert_eq!(config.report.page_size, 50);
        assert_eq!(config.report.row_limit, 5000);
        assert_eq!(config.report.timeout, 30);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            debug = true

            [api]
            client_id = "abc.apps.googleusercontent.com"
            client_secret = "env::ADSENSE_SECRET"
            storage_name = "my-sample"

            [report]
            page_size = 100
            row_limit = 1000
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert!(config.debug);
        let api = config.api.unwrap();
        assert_eq!(
            api.client_id.as_deref(),
            Some("abc.apps.googleusercontent.com")
        );
        assert_eq!(api.storage_name(), "my-sample");
        assert_eq!(config.report.page_size, 100);
        assert_eq!(config.report.row_limit, 1000);
        assert_eq!(config.report.timeout, 30);
    }

    #[test]
    fn storage_name_defaults() {
        let api = ApiSettings::default();
        assert_eq!(api.storage_name(), "adsense");
    }

    #[test]
    fn resolve_credentials_requires_both() {
        let api = ApiSettings {
            client_id: Some("id".to_string()),
            ..Default::default()
        };
        assert!(api.resolve_credentials().is_err());
    }

    #[test]
    fn credential_key_falls_back_to_client_id() {
        let api = ApiSettings {
            client_id: Some("the-client-id".to_string()),
            client_secret: Some("s".to_string()),
            ..Default::default()
        };
        assert_eq!(api.resolve_credential_key().unwrap(), "the-client-id");
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(CliConfig::load_from(&path).is_err());
    }
}
