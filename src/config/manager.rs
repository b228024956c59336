//! Configuration manager for loading and saving controller configuration
//!
//! This module provides functionality to load and save configuration to
//! %APPDATA%\WalletNavbar\config.json with atomic writes to prevent corruption.

use crate::config::models::NavbarConfig;
use crate::error::{NavbarError, Result, StringError};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Directory name under %APPDATA% holding configuration and logs
pub const APP_DIR_NAME: &str = "WalletNavbar";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the application data directory
    ///
    /// Returns: %APPDATA%\WalletNavbar (or ./WalletNavbar when APPDATA is unset)
    pub fn app_dir() -> PathBuf {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join(APP_DIR_NAME)
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        Self::app_dir().join("config.json")
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist or is corrupt, returns default configuration.
    pub fn load() -> Result<NavbarConfig> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(NavbarConfig::default());
        }

        let json = std::fs::read_to_string(&config_path)?;

        match serde_json::from_str(&json) {
            Ok(config) => {
                info!("Configuration loaded from {}", config_path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(NavbarConfig::default())
            }
        }
    }

    /// Save configuration to disk with atomic write
    ///
    /// Writes to a temporary file in the same directory, then persists it over the target.
    pub fn save(config: &NavbarConfig) -> Result<()> {
        let config_path = Self::get_config_path();
        let config_dir = config_path
            .parent()
            .ok_or_else(|| NavbarError::ConfigError(StringError::new("Invalid config path")))?;
        std::fs::create_dir_all(config_dir)?;

        let json = serde_json::to_string_pretty(config)?;
        let mut temp = tempfile::NamedTempFile::new_in(config_dir)?;
        temp.write_all(json.as_bytes())?;
        temp.persist(&config_path)
            .map_err(|e| NavbarError::ConfigError(Box::new(e)))?;

        info!("Configuration saved successfully");
        Ok(())
    }
}
