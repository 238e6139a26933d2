pub mod audio;
pub mod loader;
pub mod menu;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

// Time to wait between checking for config file changes
const CONFIG_CHECK_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub audio: audio::AudioConfig,
    #[serde(default)]
    pub menu: menu::MenuConfig,
    #[serde(skip)]
    last_checked: Option<Instant>,
}

impl Config {
    // Check if the config needs to be reloaded and reload if necessary
    pub fn check_and_reload() -> bool {
        let now = Instant::now();
        let should_check = {
            let config = CONFIG.read().unwrap();
            config
                .last_checked
                .is_none_or(|last| now.duration_since(last) > CONFIG_CHECK_INTERVAL)
        };

        if !should_check {
            return false;
        }

        if let Ok(new_config) = loader::load_config_from_file() {
            let mut config = CONFIG.write().unwrap();
            *config = new_config;
            config.last_checked = Some(now);
            true
        } else {
            let mut config = CONFIG.write().unwrap();
            config.last_checked = Some(now);
            false
        }
    }

    // Force reload the configuration from file
    pub fn force_reload() -> bool {
        if let Ok(new_config) = loader::load_config_from_file() {
            let mut config = CONFIG.write().unwrap();
            *config = new_config;
            config.last_checked = Some(Instant::now());
            true
        } else {
            false
        }
    }
}
