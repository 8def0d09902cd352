use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use common::prelude::{SealError, SecretKey};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "sealtext";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const KEY_FILE_NAME: &str = "key.pem";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Default log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Salt used when a command is not given `--salt`
    #[serde(default)]
    pub salt: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            salt: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the sealtext directory (~/.sealtext)
    pub dir: PathBuf,
    /// Path to our own private key PEM file
    pub key_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the sealtext directory path (custom or default ~/.sealtext)
    pub fn dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new state directory with a fresh key
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let dir = Self::dir(custom_path)?;

        if dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&dir)?;

        let key = SecretKey::generate()?;
        let key_path = dir.join(KEY_FILE_NAME);
        write_private_key(&key_path, key.to_pem().as_bytes())?;

        let config = config.unwrap_or_default();
        let config_path = dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        tracing::info!("initialized sealtext directory at {}", dir.display());

        Ok(Self {
            dir,
            key_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the sealtext directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let dir = Self::dir(custom_path)?;

        if !dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let key_path = dir.join(KEY_FILE_NAME);
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !key_path.exists() {
            return Err(StateError::MissingFile(KEY_FILE_NAME.to_string()));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            dir,
            key_path,
            config_path,
            config,
        })
    }

    /// Load the secret key from the key file
    pub fn load_key(&self) -> Result<SecretKey, StateError> {
        let pem = fs::read_to_string(&self.key_path)?;
        let key = SecretKey::from_pem(&pem).map_err(SealError::from)?;
        Ok(key)
    }

    /// Pick the salt for a command: explicit flag first, then the config file
    pub fn salt(&self, explicit: Option<&str>) -> Result<String, StateError> {
        explicit
            .map(str::to_string)
            .or_else(|| self.config.salt.clone())
            .ok_or(StateError::MissingSalt)
    }
}

/// Create the key file, owner-only on unix from the moment it exists
fn write_private_key(path: &Path, contents: &[u8]) -> Result<(), StateError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("sealtext directory not initialized. Run 'sealtext init' first")]
    NotInitialized,

    #[error("sealtext directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("key error: {0}")]
    Key(#[from] SealError),

    #[error("no salt given with --salt and none set in config.toml")]
    MissingSalt,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
