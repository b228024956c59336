//! Shared view model
//!
//! The view model is shared as `Arc<Mutex<ViewModel>>` so the renderer can take
//! snapshots, but only the controller thread mutates it.

use crate::model::{DaemonState, WalletSession, WalletStatus};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Shared handle to the view model
pub type SharedViewModel = Arc<Mutex<ViewModel>>;

/// State read by the navbar and wallet views
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewModel {
    /// Latest daemon sync snapshot
    pub daemon_state: DaemonState,
    /// Open wallets, at most one per `wallet_id`
    safes: Vec<WalletSession>,
    /// Latest status reported for each wallet
    pub wallet_info: BTreeMap<u64, WalletStatus>,
}

impl ViewModel {
    /// Create an empty view model wrapped for sharing
    pub fn shared() -> SharedViewModel {
        Arc::new(Mutex::new(Self::default()))
    }

    /// Open safes in display order
    pub fn safes(&self) -> &[WalletSession] {
        &self.safes
    }

    /// Look up an open safe
    pub fn safe(&self, wallet_id: u64) -> Option<&WalletSession> {
        self.safes.iter().find(|safe| safe.wallet_id == wallet_id)
    }

    /// Look up an open safe for mutation
    pub fn safe_mut(&mut self, wallet_id: u64) -> Option<&mut WalletSession> {
        self.safes.iter_mut().find(|safe| safe.wallet_id == wallet_id)
    }

    /// Add a safe, replacing the one with the same `wallet_id` in place
    ///
    /// Returns the replaced session, if any.
    pub fn open_safe(&mut self, session: WalletSession) -> Option<WalletSession> {
        if let Some(existing) = self.safe_mut(session.wallet_id) {
            debug!("Replacing open safe {}", session.wallet_id);
            return Some(std::mem::replace(existing, session));
        }
        debug!("Opening safe {}", session.wallet_id);
        self.safes.push(session);
        None
    }

    /// Remove an open safe
    pub fn remove_safe(&mut self, wallet_id: u64) -> Option<WalletSession> {
        let index = self
            .safes
            .iter()
            .position(|safe| safe.wallet_id == wallet_id)?;
        self.wallet_info.remove(&wallet_id);
        Some(self.safes.remove(index))
    }

    /// Sync progress of the daemon as a whole percentage
    pub fn progress_value(&self) -> Option<u8> {
        self.daemon_state.progress_percent()
    }
}
