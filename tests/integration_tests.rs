//! Integration tests for `wallet-navbar`
//!
//! Drive the controller loop on its own thread through `NavbarHandle`, the way the
//! host does, and check the shared view model, routes, and host quit requests.

#![allow(clippy::unwrap_used)]

use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wallet_navbar::{
    NavbarError,
    backend::{Backend, BackendRequest, EventEnvelope, InMemoryBackend},
    config::NavbarConfig,
    controller::{NavbarController, NavbarHandle, NavbarServices},
    model::{NetworkState, RecentTransfers, TransferRecord, WalletSession},
    view::{ChannelHost, Loader, LoaderHandle, MemoryNavigator, Navigator, SharedViewModel, ViewModel},
};

/// Loader that counts overlays currently open
#[derive(Clone, Default)]
struct CountingLoader {
    open: Arc<AtomicUsize>,
    messages: Arc<Mutex<Vec<String>>>,
}

struct CountingHandle(Arc<AtomicUsize>);

impl Loader for CountingLoader {
    fn open(&self, message: &str) -> Box<dyn LoaderHandle> {
        self.open.fetch_add(1, Ordering::SeqCst);
        self.messages.lock().push(message.to_string());
        Box::new(CountingHandle(Arc::clone(&self.open)))
    }
}

impl LoaderHandle for CountingHandle {
    fn close(self: Box<Self>) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct Harness {
    handle: NavbarHandle,
    view_model: SharedViewModel,
    backend: Arc<InMemoryBackend>,
    loader: CountingLoader,
    navigator: MemoryNavigator,
    quit_rx: std::sync::mpsc::Receiver<()>,
    thread: Option<std::thread::JoinHandle<()>>,
}

fn start(config: NavbarConfig, path: &str, safes: Vec<WalletSession>) -> Harness {
    let view_model = ViewModel::shared();
    for safe in safes {
        view_model.lock().open_safe(safe);
    }
    let backend = Arc::new(InMemoryBackend::new());
    let loader = CountingLoader::default();
    let navigator = MemoryNavigator::new(path);
    let (host, quit_rx) = ChannelHost::channel();
    let (handle, receiver) = NavbarHandle::channel();

    let controller = NavbarController::new(
        config,
        Arc::clone(&view_model),
        NavbarServices {
            backend: Arc::clone(&backend) as Arc<dyn Backend>,
            loader: Box::new(loader.clone()),
            navigator: Box::new(navigator.clone()),
            host: Arc::new(host),
        },
        receiver,
    );

    Harness {
        handle,
        view_model,
        backend,
        loader,
        navigator,
        quit_rx,
        thread: Some(controller.spawn_event_loop()),
    }
}

impl Harness {
    /// Shut the controller down and wait for its thread
    fn stop(&mut self) {
        self.handle.shutdown().unwrap();
        if let Some(thread) = self.thread.take() {
            thread.join().unwrap();
        }
    }
}

fn send_line(harness: &Harness, line: &str) {
    let event = EventEnvelope::parse(line).unwrap().into_event().unwrap();
    harness.handle.dispatch(event).unwrap();
}

/// Daemon sync flow: one overlay while loading, closed once synced
#[test]
fn test_daemon_sync_lifecycle() {
    let mut harness = start(NavbarConfig::default(), "/", Vec::new());

    send_line(&harness, r#"{"event":"update_daemon_state","data":{"daemon_network_state":0}}"#);
    send_line(
        &harness,
        r#"{"event":"update_daemon_state","data":{"daemon_network_state":1,"height":50,"synchronization_start_height":0,"max_net_seen_height":100}}"#,
    );
    send_line(&harness, r#"{"event":"update_daemon_state","data":{"daemon_network_state":2,"height":100}}"#);

    harness.stop();

    assert_eq!(harness.loader.open.load(Ordering::SeqCst), 0);
    assert_eq!(harness.loader.messages.lock().len(), 1);
    let view_model = harness.view_model.lock();
    assert_eq!(
        view_model.daemon_state.daemon_network_state,
        NetworkState::Online
    );
    assert_eq!(view_model.daemon_state.height, 100);
}

/// Transfers arriving before and after the history is loaded
#[test]
fn test_money_transfer_flow() {
    let mut harness = start(NavbarConfig::default(), "/", vec![WalletSession::new(1)]);
    harness.backend.set_recent_transfers(
        1,
        RecentTransfers {
            history: vec![TransferRecord::new("x")],
            unconfirmed: Some(vec![TransferRecord::new("u")]),
        },
    );

    let transfer = |hash: &str, confirmations: u64| {
        json!({
            "event": "money_transfer",
            "data": {
                "wallet_id": 1,
                "balance": 500,
                "unlocked_balance": 400,
                "ti": {"tx_hash": hash, "amount": 10, "confirmations": confirmations}
            }
        })
        .to_string()
    };

    send_line(&harness, &transfer("t", 0));
    send_line(&harness, &transfer("t", 1));
    send_line(&harness, &transfer("n", 0));
    send_line(
        &harness,
        r#"{"event":"money_transfer","data":{"wallet_id":7,"balance":1,"unlocked_balance":1,"ti":{"tx_hash":"z"}}}"#,
    );

    harness.stop();

    assert_eq!(
        harness.backend.requests(),
        vec![BackendRequest::GetRecentTransfers(1)]
    );
    let view_model = harness.view_model.lock();
    assert_eq!(view_model.safes().len(), 1);
    let safe = view_model.safe(1).unwrap();
    assert_eq!(safe.balance, 500);
    let history = safe.history.as_ref().unwrap();
    let hashes: Vec<&str> = history.iter().map(|r| r.tx_hash.as_str()).collect();
    assert_eq!(hashes, vec!["n", "t", "u", "x"]);
    assert_eq!(history[1].confirmations, Some(1));
}

/// Closing the wallet whose view is shown returns to the wallet list
#[test]
fn test_close_wallet_flow() {
    let mut harness = start(
        NavbarConfig::default(),
        "/safe/2/send",
        vec![WalletSession::new(1), WalletSession::new(2)],
    );
    harness.backend.set_busy(1, true);

    harness.handle.close_wallet(1).unwrap();
    harness.handle.close_wallet(2).unwrap();

    harness.stop();

    let ids: Vec<u64> = harness
        .view_model
        .lock()
        .safes()
        .iter()
        .map(|s| s.wallet_id)
        .collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(harness.navigator.path(), "/safes");
    assert_eq!(
        harness.backend.requests(),
        vec![BackendRequest::CloseWallet(1), BackendRequest::CloseWallet(2)]
    );
}

/// A quit request reaches the host after the configured delay
#[test]
fn test_quit_request_reaches_host() {
    let config = NavbarConfig {
        quit_delay_ms: 50,
        ..NavbarConfig::default()
    };
    let mut harness = start(config, "/", Vec::new());

    send_line(&harness, r#"{"event":"quit_requested"}"#);

    assert!(
        harness
            .quit_rx
            .recv_timeout(Duration::from_millis(20))
            .is_err(),
        "quit must not be forwarded before the delay"
    );
    assert!(
        harness
            .quit_rx
            .recv_timeout(Duration::from_secs(2))
            .is_ok(),
        "quit should be forwarded after the delay"
    );

    harness.stop();
}

/// Shutting down before the delay elapses drops the pending quit
#[test]
fn test_shutdown_cancels_pending_quit() {
    let config = NavbarConfig {
        quit_delay_ms: 5_000,
        ..NavbarConfig::default()
    };
    let mut harness = start(config, "/", Vec::new());
    send_line(&harness, r#"{"event":"quit_requested","data":{}}"#);

    harness.stop();

    assert!(harness.quit_rx.try_recv().is_err());
    assert!(matches!(
        harness.handle.dispatch_named("quit_requested", json!({})),
        Err(NavbarError::ControllerStopped)
    ));
}

/// Unknown event names are rejected before reaching the controller
#[test]
fn test_unknown_event_rejected() {
    let mut harness = start(NavbarConfig::default(), "/", Vec::new());

    let result = harness.handle.dispatch_named("update_something", json!({}));
    assert!(matches!(result, Err(NavbarError::UnknownEvent(name)) if name == "update_something"));

    harness.stop();
}
