//! Configuration data models
//!
//! This module defines the settings the navbar controller reads at startup.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Network state reported by a daemon that is fully synchronized
pub const DEFAULT_SYNCED_NETWORK_STATE: u8 = 2;

/// Navbar controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Text shown in the loading overlay while the daemon is not synced
    pub loading_message: String,
    /// Delay before a quit request is forwarded to the host, in milliseconds
    pub quit_delay_ms: u64,
    /// Daemon network state that counts as "fully synced"
    pub synced_network_state: u8,
    /// Route of the wallet list view
    pub wallet_list_route: String,
    /// Route prefix of a single wallet's views (followed by the wallet id)
    pub wallet_route_prefix: String,
    /// Merge `update_wallet_info` payloads into open safes (disabled by default)
    pub apply_wallet_info_updates: bool,
}

impl NavbarConfig {
    /// Quit forwarding delay as a `Duration`
    pub fn quit_delay(&self) -> Duration {
        Duration::from_millis(self.quit_delay_ms)
    }

    /// Route of the views belonging to `wallet_id`
    pub fn wallet_route(&self, wallet_id: u64) -> String {
        format!("{}{wallet_id}", self.wallet_route_prefix)
    }
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            loading_message: "Network is loading or offline. Please wait...".to_string(),
            quit_delay_ms: 1000,
            synced_network_state: DEFAULT_SYNCED_NETWORK_STATE,
            wallet_list_route: "/safes".to_string(),
            wallet_route_prefix: "/safe/".to_string(),
            apply_wallet_info_updates: false,
        }
    }
}
