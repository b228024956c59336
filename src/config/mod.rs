//! Configuration management module
//!
//! This module handles loading, saving, and managing controller configuration.
//! Configuration is stored in %APPDATA%\WalletNavbar\config.json with atomic writes
//! to prevent corruption.

pub mod manager;
pub mod models;

pub use manager::ConfigManager;
pub use models::NavbarConfig;
