//! Configuration commands.

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &CliConfig) -> CliResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", CliConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &CliConfig) -> CliResult<()> {
    if let Some(ref api) = config.api {
        if api.client_id.is_some() || api.client_secret.is_some() {
            api.resolve_credentials()
                .map_err(|e| CliError::Config(format!("invalid API credentials: {}", e)))?;
            println!("API credentials are valid.");
        }
    }

    if config.report.page_size == 0 {
        return Err(CliError::Config(
            "report.page_size must be at least 1".to_string(),
        ));
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> CliResult<()> {
    let config_path = CliConfig::default_path();
    println!("config: {}", config_path.display());
    Ok(())
}
