//! In-process backend with scripted responses

use crate::backend::Backend;
use crate::error::{NavbarError, Result, StringError};
use crate::model::RecentTransfers;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// A request received by `InMemoryBackend`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendRequest {
    /// `closeWallet(wallet_id)`
    CloseWallet(u64),
    /// `getRecentTransfers(wallet_id)`
    GetRecentTransfers(u64),
}

/// Backend that answers from in-memory tables
///
/// Wallets without recorded transfers answer with an empty history. Wallets marked
/// busy refuse to close. While disconnected, every request fails with
/// `NavbarError::BackendUnavailable`.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    recent: Mutex<HashMap<u64, RecentTransfers>>,
    busy: Mutex<HashSet<u64>>,
    disconnected: AtomicBool,
    requests: Mutex<Vec<BackendRequest>>,
}

impl InMemoryBackend {
    /// Create an empty, connected backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer to `getRecentTransfers` for a wallet
    pub fn set_recent_transfers(&self, wallet_id: u64, recent: RecentTransfers) {
        self.recent.lock().insert(wallet_id, recent);
    }

    /// Mark a wallet as busy (closing it fails) or idle
    pub fn set_busy(&self, wallet_id: u64, busy: bool) {
        let mut set = self.busy.lock();
        if busy {
            set.insert(wallet_id);
        } else {
            set.remove(&wallet_id);
        }
    }

    /// Simulate losing or regaining the bridge connection
    pub fn set_connected(&self, connected: bool) {
        self.disconnected.store(!connected, Ordering::SeqCst);
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().clone()
    }

    fn record(&self, request: BackendRequest) -> Result<()> {
        debug!("Backend request: {:?}", request);
        self.requests.lock().push(request);
        if self.disconnected.load(Ordering::SeqCst) {
            return Err(NavbarError::BackendUnavailable);
        }
        Ok(())
    }
}

impl Backend for InMemoryBackend {
    fn close_wallet(&self, wallet_id: u64) -> Result<()> {
        self.record(BackendRequest::CloseWallet(wallet_id))?;
        if self.busy.lock().contains(&wallet_id) {
            return Err(NavbarError::backend(
                "closeWallet",
                StringError::new(format!("wallet {wallet_id} is busy")),
            ));
        }
        self.recent.lock().remove(&wallet_id);
        Ok(())
    }

    fn get_recent_transfers(&self, wallet_id: u64) -> Result<RecentTransfers> {
        self.record(BackendRequest::GetRecentTransfers(wallet_id))?;
        Ok(self
            .recent
            .lock()
            .get(&wallet_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransferRecord;

    #[test]
    fn test_unknown_wallet_has_empty_history() {
        let backend = InMemoryBackend::new();
        let recent = backend.get_recent_transfers(9).unwrap();
        assert!(recent.history.is_empty());
        assert!(recent.unconfirmed.is_none());
    }

    #[test]
    fn test_recorded_transfers_are_returned() {
        let backend = InMemoryBackend::new();
        backend.set_recent_transfers(
            1,
            RecentTransfers {
                history: vec![TransferRecord::new("x")],
                unconfirmed: None,
            },
        );
        assert_eq!(backend.get_recent_transfers(1).unwrap().history.len(), 1);
        assert_eq!(
            backend.requests(),
            vec![BackendRequest::GetRecentTransfers(1)]
        );
    }

    #[test]
    fn test_busy_wallet_refuses_close() {
        let backend = InMemoryBackend::new();
        backend.set_busy(3, true);
        let err = backend.close_wallet(3).unwrap_err();
        assert!(matches!(
            err,
            NavbarError::BackendRequestFailed {
                request: "closeWallet",
                ..
            }
        ));

        backend.set_busy(3, false);
        assert!(backend.close_wallet(3).is_ok());
    }

    #[test]
    fn test_disconnected_backend_fails_every_request() {
        let backend = InMemoryBackend::new();
        backend.set_connected(false);
        assert!(matches!(
            backend.close_wallet(1),
            Err(NavbarError::BackendUnavailable)
        ));
        assert!(matches!(
            backend.get_recent_transfers(1),
            Err(NavbarError::BackendUnavailable)
        ));
        assert_eq!(backend.requests().len(), 2);
    }
}
