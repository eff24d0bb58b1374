//! Indirection for credential values in `config.toml`.
//!
//! OAuth client ids and secrets do not have to sit in the config file in
//! plain text. A value is first classified as a [`SecretRef`] and then
//! resolved: `env::ADSENSE_CLIENT_SECRET` reads the named environment
//! variable, `pass::google/adsense` asks the `pass` password manager for
//! that entry, and everything else is taken literally.

use std::process::Command;

/// A classified config value, before resolution.
#[derive(Debug, PartialEq, Eq)]
enum SecretRef<'a> {
    /// The value itself is the secret.
    Literal(&'a str),
    /// `env::NAME`, resolved from the environment.
    Env(&'a str),
    /// `pass::entry`, resolved by running `pass show entry`.
    Pass(&'a str),
}

impl<'a> SecretRef<'a> {
    fn classify(value: &'a str) -> Self {
        if let Some(var) = value.strip_prefix("env::") {
            Self::Env(var)
        } else if let Some(entry) = value.strip_prefix("pass::") {
            Self::Pass(entry)
        } else {
            Self::Literal(value)
        }
    }
}

/// Resolves a config value, following an `env::` or `pass::` reference
/// if the value carries one.
pub fn resolve(value: &str) -> Result<String, String> {
    match SecretRef::classify(value) {
        SecretRef::Literal(v) => Ok(v.to_string()),
        SecretRef::Env(var) => std::env::var(var)
            .map_err(|_| format!("secret reference `env::{var}` points at an unset variable")),
        SecretRef::Pass(entry) => read_pass_entry(entry),
    }
}

/// Asks `pass` for an entry. Only the first line counts; `pass` appends
/// metadata lines below the secret in some store layouts.
fn read_pass_entry(entry: &str) -> Result<String, String> {
    let output = Command::new("pass")
        .args(["show", entry])
        .output()
        .map_err(|e| format!("could not invoke `pass` for `{entry}`: {e}"))?;

    if !output.status.success() {
        return Err(format!(
            "pass entry `{entry}` could not be read ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    match String::from_utf8_lossy(&output.stdout).lines().next() {
        Some(line) => Ok(line.to_string()),
        None => Err(format!("pass entry `{entry}` is empty")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiSettings;

    #[test]
    fn classification() {
        assert_eq!(
            SecretRef::classify("env::ADSENSE_CLIENT_SECRET"),
            SecretRef::Env("ADSENSE_CLIENT_SECRET")
        );
        assert_eq!(
            SecretRef::classify("pass::google/adsense"),
            SecretRef::Pass("google/adsense")
        );
        assert_eq!(
            SecretRef::classify("abc.apps.googleusercontent.com"),
            SecretRef::Literal("abc.apps.googleusercontent.com")
        );
        // Only a leading prefix counts as a reference.
        assert_eq!(
            SecretRef::classify("not env::SOMETHING"),
            SecretRef::Literal("not env::SOMETHING")
        );
    }

    #[test]
    fn literal_client_id_is_returned_verbatim() {
        assert_eq!(
            resolve("abc.apps.googleusercontent.com").unwrap(),
            "abc.apps.googleusercontent.com"
        );
        assert_eq!(resolve("").unwrap(), "");
    }

    #[test]
    fn env_reference_reads_the_variable() {
        unsafe {
            std::env::set_var("_ADREPORT_SECRET_ENV_OK", "s3cr3t");
        }
        assert_eq!(resolve("env::_ADREPORT_SECRET_ENV_OK").unwrap(), "s3cr3t");
        unsafe {
            std::env::remove_var("_ADREPORT_SECRET_ENV_OK");
        }
    }

    #[test]
    fn unset_env_reference_names_the_variable() {
        let err = resolve("env::_ADREPORT_SECRET_ENV_UNSET").unwrap_err();
        assert!(err.contains("_ADREPORT_SECRET_ENV_UNSET"));
        assert!(err.contains("unset"));
    }

    #[test]
    fn missing_pass_entry_fails() {
        // Fails whether or not `pass` is installed: either the binary is
        // absent or the entry does not exist.
        assert!(resolve("pass::adreport/no/such/entry/2f8a1c").is_err());
    }

    #[test]
    fn api_settings_follow_env_references() {
        unsafe {
            std::env::set_var("_ADREPORT_API_SECRET", "client-secret-value");
        }
        let api = ApiSettings {
            client_id: Some("abc.apps.googleusercontent.com".to_string()),
            client_secret: Some("env::_ADREPORT_API_SECRET".to_string()),
            ..Default::default()
        };
        let (id, secret) = api.resolve_credentials().unwrap();
        assert_eq!(id, "abc.apps.googleusercontent.com");
        assert_eq!(secret, "client-secret-value");
        unsafe {
            std::env::remove_var("_ADREPORT_API_SECRET");
        }
    }
}
