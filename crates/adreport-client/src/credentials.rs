//! Cached OAuth refresh credentials.
//!
//! After the first interactive consent, the granted scopes and refresh token
//! are persisted so later runs can mint access tokens without prompting. One
//! flat `<name>.auth` file per storage name lives under a per-user data
//! directory.
//!
//! # Security
//!
//! Files are obfuscated with a keystream derived from a caller-supplied key
//! and a fixed application salt. This only hides the token from casual disk
//! inspection; anyone who can run code as the same OS user can recover it.
//! This is NOT a secret store and must not be treated as a security
//! boundary. The files additionally get `0o600` permissions on Unix.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

/// Salt mixed into the keystream so the same key produces a different
/// stream in other applications.
const APP_SALT: &[u8] = b"adreport-credential-store";

/// First line of the decoded payload; a mismatch means the wrong key or a
/// corrupt file.
const MAGIC: &str = "adreport.v1";

/// A cached OAuth credential: the granted scopes and the refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// The OAuth scopes that were granted.
    pub scopes: Vec<String>,
    /// The long-lived refresh token.
    pub refresh_token: String,
}

impl Credential {
    /// Creates a new credential.
    pub fn new(scopes: Vec<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            scopes,
            refresh_token: refresh_token.into(),
        }
    }

    /// Returns true if the credential covers all required scopes.
    pub fn has_scopes(&self, required: &[String]) -> bool {
        required.iter().all(|scope| self.scopes.contains(scope))
    }
}

/// File-backed store for cached credentials.
#[derive(Debug)]
pub struct CredentialStore {
    dir: PathBuf,
    key: String,
}

impl CredentialStore {
    /// Creates a store rooted at `dir`, obfuscating with `key`.
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Returns the default per-user storage directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("adreport")
    }

    /// Returns the file path for a storage name.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.auth", name))
    }

    /// Loads the credential stored under `name`.
    ///
    /// A missing, unreadable, corrupt, or wrong-key file all return `None`,
    /// which callers treat as "re-authorize"; none of these are fatal.
    pub fn get(&self, name: &str) -> Option<Credential> {
        let path = self.path_for(name);
        let encoded = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no credential file at {:?}", path);
                return None;
            }
            Err(e) => {
                warn!("failed to read credential file {:?}: {}", path, e);
                return None;
            }
        };

        let mut bytes = match BASE64.decode(encoded.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("credential file {:?} is not valid base64: {}", path, e);
                return None;
            }
        };
        self.apply_keystream(&mut bytes);

        let Ok(payload) = String::from_utf8(bytes) else {
            warn!("credential file {:?} did not decode, ignoring", path);
            return None;
        };

        match Self::parse_payload(&payload) {
            Some(credential) => {
                debug!("loaded credential {:?}", path);
                Some(credential)
            }
            None => {
                warn!("credential file {:?} is corrupt, ignoring", path);
                None
            }
        }
    }

    /// Persists a credential under `name`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be written.
    pub fn set(&self, name: &str, credential: &Credential) -> ApiResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            ApiError::configuration(format!("failed to create credential directory: {}", e))
        })?;

        let payload = format!(
            "{}\n{}\n{}\n",
            MAGIC,
            credential.scopes.join(" "),
            credential.refresh_token
        );
        let mut bytes = payload.into_bytes();
        self.apply_keystream(&mut bytes);
        let encoded = BASE64.encode(&bytes);

        let path = self.path_for(name);

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("auth.tmp");
        fs::write(&temp_path, &encoded).map_err(|e| {
            ApiError::configuration(format!("failed to write credential file: {}", e))
        })?;
        fs::rename(&temp_path, &path).map_err(|e| {
            ApiError::configuration(format!("failed to rename credential file: {}", e))
        })?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&path, perms);
        }

        debug!("saved credential {:?}", path);
        Ok(())
    }

    /// Removes the credential stored under `name`, if present.
    pub fn clear(&self, name: &str) -> ApiResult<()> {
        let path = self.path_for(name);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                ApiError::configuration(format!("failed to remove credential file: {}", e))
            })?;
            debug!("cleared credential {:?}", path);
        }
        Ok(())
    }

    /// Returns the storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// XORs `data` with a SHA-256-derived keystream. Self-inverse, so the
    /// same call encodes and decodes.
    fn apply_keystream(&self, data: &mut [u8]) {
        for (block_index, block) in data.chunks_mut(32).enumerate() {
            let mut hasher = Sha256::new();
            hasher.update(self.key.as_bytes());
            hasher.update(APP_SALT);
            hasher.update((block_index as u64).to_le_bytes());
            let stream = hasher.finalize();
            for (byte, key_byte) in block.iter_mut().zip(stream.iter()) {
                *byte ^= key_byte;
            }
        }
    }

    /// Parses the decoded payload: magic, space-joined scopes, refresh token.
    fn parse_payload(payload: &str) -> Option<Credential> {
        let mut lines = payload.lines();
        if lines.next()? != MAGIC {
            return None;
        }
        let scopes: Vec<String> = lines.next()?.split_whitespace().map(String::from).collect();
        let refresh_token = lines.next()?;
        if refresh_token.is_empty() {
            return None;
        }
        Some(Credential::new(scopes, refresh_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential::new(
            vec![
                "https://www.googleapis.com/auth/adsense.readonly".to_string(),
                "https://www.googleapis.com/auth/adsense".to_string(),
            ],
            "1//refresh-token-value",
        )
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path(), "unit-test-key");

        let original = credential();
        store.set("sample", &original).unwrap();

        let loaded = store.get("sample").unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn get_missing_name_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path(), "unit-test-key");
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn corrupt_file_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path(), "unit-test-key");

        fs::write(store.path_for("sample"), "not base64 at all !!!").unwrap();
        assert!(store.get("sample").is_none());

        // Valid base64 but garbage underneath.
        fs::write(store.path_for("other"), BASE64.encode(b"garbage")).unwrap();
        assert!(store.get("other").is_none());
    }

    #[test]
    fn wrong_key_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path(), "key-one");
        store.set("sample", &credential()).unwrap();

        let other = CredentialStore::new(dir.path(), "key-two");
        assert!(other.get("sample").is_none());
    }

    #[test]
    fn set_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = CredentialStore::new(&nested, "unit-test-key");

        store.set("sample", &credential()).unwrap();
        assert!(store.path_for("sample").exists());
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path(), "unit-test-key");

        store.set("sample", &credential()).unwrap();
        store.clear("sample").unwrap();
        assert!(store.get("sample").is_none());

        // Clearing an absent name is fine.
        store.clear("sample").unwrap();
    }

    #[test]
    fn file_on_disk_is_not_plaintext() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path(), "unit-test-key");
        store.set("sample", &credential()).unwrap();

        let raw = fs::read_to_string(store.path_for("sample")).unwrap();
        assert!(!raw.contains("refresh-token-value"));
    }

    #[test]
    fn scope_check() {
        let cred = credential();
        assert!(cred.has_scopes(&["https://www.googleapis.com/auth/adsense".to_string()]));
        assert!(!cred.has_scopes(&["https://www.googleapis.com/auth/blogger".to_string()]));
    }
}
