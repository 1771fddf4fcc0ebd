use anyhow::Result;
use std::env;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::constants::API_KEY_NAME;

const KEYRING_SERVICE: &str = "replydraft";
const KEY_FILE_NAME: &str = ".gemini_api_key";

/// Gemini API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where the API key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    Keyring,
    File,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment variable {}", API_KEY_NAME),
            Self::Keyring => f.write_str("system keyring"),
            Self::File => f.write_str("key file"),
        }
    }
}

/// Debug information about credential storage backends
#[derive(Debug, Clone)]
pub struct CredentialDebugInfo {
    pub env_var: &'static str,
    pub env_var_set: bool,
    pub keyring_has_key: bool,
    pub file_path: PathBuf,
    pub file_exists: bool,
}

impl fmt::Display for CredentialDebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Credential Storage Status:")?;
        writeln!(
            f,
            "  Environment var ({}): {}",
            self.env_var,
            if self.env_var_set { "set" } else { "not set" }
        )?;
        writeln!(
            f,
            "  Keyring entry: {}",
            if self.keyring_has_key {
                "present"
            } else {
                "missing"
            }
        )?;
        writeln!(f, "  File fallback: {}", self.file_path.display())?;
        writeln!(f, "  File exists: {}", self.file_exists)?;
        Ok(())
    }
}

/// Looks up the API key: environment, then keyring, then a private file.
pub struct CredentialStore {
    env_var: &'static str,
    keyring_service: String,
    key_file: PathBuf,
}

impl CredentialStore {
    pub fn new() -> Self {
        let key_file = crate::config::Config::config_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(KEY_FILE_NAME);

        Self {
            env_var: API_KEY_NAME,
            keyring_service: KEYRING_SERVICE.to_string(),
            key_file,
        }
    }

    #[cfg(test)]
    fn with_sources(env_var: &'static str, key_file: PathBuf) -> Self {
        Self {
            env_var,
            keyring_service: format!("{}-test-{}", KEYRING_SERVICE, std::process::id()),
            key_file,
        }
    }

    /// Get diagnostic info about credential storage backend
    pub fn debug_info(&self) -> CredentialDebugInfo {
        CredentialDebugInfo {
            env_var: self.env_var,
            env_var_set: self.env_get().is_some(),
            keyring_has_key: self.keyring_get().is_some(),
            file_path: self.key_file.clone(),
            file_exists: self.key_file.exists(),
        }
    }

    /// Load the API key from the first source that has a non-blank value.
    /// Surrounding whitespace is stripped.
    pub fn load_api_key(&self) -> Result<(ApiKey, CredentialSource)> {
        if let Some(key) = self.env_get() {
            return Ok((ApiKey::new(key), CredentialSource::Environment));
        }

        if let Some(key) = self.keyring_get() {
            return Ok((ApiKey::new(key), CredentialSource::Keyring));
        }

        if let Some(key) = self.file_get() {
            return Ok((ApiKey::new(key), CredentialSource::File));
        }

        anyhow::bail!(
            "{} is not configured. Run 'replydraft setup' or set the {} environment variable.",
            API_KEY_NAME,
            self.env_var
        )
    }

    /// Store the key in the keyring, falling back to the key file.
    pub fn store_api_key(&self, key: &str) -> Result<CredentialSource> {
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("API key is empty");
        }

        if self.keyring_set(key) && self.keyring_get().as_deref() == Some(key) {
            return Ok(CredentialSource::Keyring);
        }

        self.file_set(key)?;
        Ok(CredentialSource::File)
    }

    fn env_get(&self) -> Option<String> {
        env::var(self.env_var).ok().and_then(non_blank)
    }

    fn keyring_entry(&self) -> Option<keyring::Entry> {
        keyring::Entry::new(&self.keyring_service, API_KEY_NAME).ok()
    }

    fn keyring_get(&self) -> Option<String> {
        let entry = self.keyring_entry()?;
        entry.get_password().ok().and_then(non_blank)
    }

    /// A fresh entry is used for every access, so a successful write here is
    /// only trusted once a second entry reads it back.
    fn keyring_set(&self, key: &str) -> bool {
        match self.keyring_entry() {
            Some(entry) => entry.set_password(key).is_ok(),
            None => false,
        }
    }

    fn file_get(&self) -> Option<String> {
        fs::read_to_string(&self.key_file).ok().and_then(non_blank)
    }

    /// Write key to file fallback (with restricted permissions)
    fn file_set(&self, key: &str) -> Result<()> {
        if let Some(parent) = self.key_file.parent() {
            fs::create_dir_all(parent)?;
        }

        // Create file with restricted permissions atomically to avoid TOCTOU
        #[cfg(unix)]
        {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.key_file)?;
            file.write_all(key.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.key_file, key)?;
        }

        Ok(())
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
