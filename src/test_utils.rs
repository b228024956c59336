//! Shared test utilities for `wallet-navbar` unit tests.
//!
//! Provides the APPDATA guard used by configuration tests, record builders, and
//! recording fakes for the loading overlay and the host.

use crate::model::{TransferRecord, WalletSession};
use crate::view::{HostBridge, Loader, LoaderHandle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Global mutex to serialize tests that modify the APPDATA environment variable.
static APPDATA_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Create a temporary test directory that is removed when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that points APPDATA at a temp directory for a test scope
/// and restores the original value when dropped.
///
/// The `APPDATA_LOCK` is held for the guard's lifetime, so tests that touch
/// APPDATA run one at a time even under the parallel test runner.
pub struct AppdataGuard {
    original: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables while holding APPDATA_LOCK"
)]
impl AppdataGuard {
    /// Set APPDATA to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = APPDATA_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var("APPDATA").ok();
        // SAFETY: APPDATA_LOCK serializes every writer; the value is restored on drop.
        unsafe {
            std::env::set_var("APPDATA", temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables while holding APPDATA_LOCK"
)]
impl Drop for AppdataGuard {
    fn drop(&mut self) {
        // SAFETY: still holding APPDATA_LOCK through `_lock`.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var("APPDATA", original);
            }
        } else {
            unsafe {
                std::env::remove_var("APPDATA");
            }
        }
    }
}

/// Build a transfer record with only its hash set.
pub fn transfer(tx_hash: &str) -> TransferRecord {
    TransferRecord::new(tx_hash)
}

/// Build a safe with the given id and no history loaded.
pub fn safe(wallet_id: u64) -> WalletSession {
    WalletSession::new(wallet_id)
}

/// Loader fake that counts currently open overlays.
#[derive(Default, Clone)]
pub struct FakeLoader {
    pub open_count: Arc<AtomicUsize>,
    pub opened_total: Arc<AtomicUsize>,
    pub messages: Arc<Mutex<Vec<String>>>,
}

impl FakeLoader {
    pub fn open_overlays(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }

    pub fn opened_total(&self) -> usize {
        self.opened_total.load(Ordering::SeqCst)
    }
}

struct FakeLoaderHandle {
    open_count: Arc<AtomicUsize>,
}

impl LoaderHandle for FakeLoaderHandle {
    fn close(self: Box<Self>) {
        self.open_count.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Loader for FakeLoader {
    fn open(&self, message: &str) -> Box<dyn LoaderHandle> {
        self.open_count.fetch_add(1, Ordering::SeqCst);
        self.opened_total.fetch_add(1, Ordering::SeqCst);
        self.messages.lock().push(message.to_string());
        Box::new(FakeLoaderHandle {
            open_count: Arc::clone(&self.open_count),
        })
    }
}

/// Host fake counting quit requests.
#[derive(Default, Clone)]
pub struct FakeHost {
    pub quit_calls: Arc<AtomicUsize>,
}

impl FakeHost {
    pub fn quit_calls(&self) -> usize {
        self.quit_calls.load(Ordering::SeqCst)
    }
}

impl HostBridge for FakeHost {
    fn request_quit(&self) {
        self.quit_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn fake_loader_tracks_open_handles() {
    let loader = FakeLoader::default();
    let handle = loader.open("wait");
    assert_eq!(loader.open_overlays(), 1);
    handle.close();
    assert_eq!(loader.open_overlays(), 0);
    assert_eq!(loader.messages.lock().as_slice(), ["wait".to_string()]);
}
