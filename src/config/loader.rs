#![warn(clippy::all, clippy::pedantic)]

use once_cell::sync::Lazy;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use super::Config;

// Fallback config file path when no user config directory exists
const CONFIG_FILE_PATH: &str = "config/gennacatch.toml";

// Last modified time of the config file, to skip redundant re-parses
static LAST_MODIFIED: Lazy<Mutex<Option<SystemTime>>> = Lazy::new(|| Mutex::new(None));

/// Loads the configuration from the default location, creating a default
/// file on first run.
pub fn load_config_from_file() -> Result<Config, ConfigError> {
    let config_path = get_config_file_path();

    if !config_path.exists() {
        let default_config = Config::default();
        save_config_to_file(&default_config)?;
        return Ok(default_config);
    }

    // Skip the parse when the file hasn't changed since the last load
    let metadata = fs::metadata(&config_path)?;
    let last_modified = metadata.modified()?;
    {
        let mut previous = LAST_MODIFIED.lock().unwrap();
        if *previous == Some(last_modified) {
            return Ok(super::CONFIG.read().unwrap().clone());
        }
        *previous = Some(last_modified);
    }

    load_config_from_path(&config_path)
}

/// Reads and parses a config file from an explicit path.
pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    let mut file = fs::File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Saves the configuration to the default location.
pub fn save_config_to_file(config: &Config) -> Result<(), ConfigError> {
    let config_path = get_config_file_path();
    save_config_to_path(config, &config_path)
}

/// Serializes the configuration as TOML to an explicit path.
pub fn save_config_to_path(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)?;

    let metadata = fs::metadata(path)?;
    *LAST_MODIFIED.lock().unwrap() = metadata.modified().ok();

    Ok(())
}

// Get the path to the config file
fn get_config_file_path() -> PathBuf {
    // Check for environment variable override
    if let Ok(path) = std::env::var("GENNACATCH_CONFIG") {
        return PathBuf::from(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("gennacatch").join("config.toml")
    } else {
        // Fallback to local directory
        PathBuf::from(CONFIG_FILE_PATH)
    }
}

// Custom error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config io error: {err}"),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Serialize(err) => write!(f, "config serialize error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
