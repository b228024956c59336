//! Navbar controller implementation
//!
//! This module implements the controller that applies backend events to the
//! shared view model and drives the loading overlay, navigation, and host quit.

use crate::backend::{Backend, BackendEvent};
use crate::config::NavbarConfig;
use crate::controller::history::{self, HistoryChange};
use crate::controller::scheduler::{Job, Scheduler};
use crate::error::{NavbarError, Result};
use crate::model::{DaemonState, MoneyTransfer, WalletInfoUpdate, WalletSession, WalletStatus};
use crate::view::{
    HostBridge, Loader, LoaderHandle, Navigator, SharedViewModel, is_within_route,
};
use serde_json::Value;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::{Arc, mpsc};
use std::time::Instant;

/// Messages accepted by the controller loop
///
/// Messages are applied in the order they were sent, so every writer of the
/// view model goes through this queue.
pub enum ControllerMessage {
    /// A backend event to apply
    Event(BackendEvent),
    /// Add a wallet session opened by another view
    OpenSafe(WalletSession),
    /// Close a wallet on behalf of another view
    CloseWallet(u64),
    /// Run a job on the controller thread, in order with other messages
    Run(Job),
    /// Cancel pending tasks and leave the loop
    Shutdown,
}

impl fmt::Debug for ControllerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(event) => f.debug_tuple("Event").field(event).finish(),
            Self::OpenSafe(session) => f.debug_tuple("OpenSafe").field(&session.wallet_id).finish(),
            Self::CloseWallet(wallet_id) => f.debug_tuple("CloseWallet").field(wallet_id).finish(),
            Self::Run(_) => f.write_str("Run(..)"),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}

/// Cloneable handle other components use to reach the controller loop
#[derive(Debug, Clone)]
pub struct NavbarHandle {
    sender: mpsc::Sender<ControllerMessage>,
}

impl NavbarHandle {
    /// Create a handle and the receiver the controller loop consumes
    pub fn channel() -> (Self, mpsc::Receiver<ControllerMessage>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    fn send(&self, message: ControllerMessage) -> Result<()> {
        self.sender
            .send(message)
            .map_err(|_| NavbarError::ControllerStopped)
    }

    /// Queue a decoded backend event
    pub fn dispatch(&self, event: BackendEvent) -> Result<()> {
        self.send(ControllerMessage::Event(event))
    }

    /// Decode and queue a named backend event
    pub fn dispatch_named(&self, name: &str, data: Value) -> Result<()> {
        self.dispatch(BackendEvent::from_named(name, data)?)
    }

    /// Ask the controller to add an open wallet session
    pub fn open_safe(&self, session: WalletSession) -> Result<()> {
        self.send(ControllerMessage::OpenSafe(session))
    }

    /// Ask the controller to close a wallet
    pub fn close_wallet(&self, wallet_id: u64) -> Result<()> {
        self.send(ControllerMessage::CloseWallet(wallet_id))
    }

    /// Run `job` on the controller thread after every message sent before it
    pub fn run_on_controller(&self, job: impl FnOnce() + Send + 'static) -> Result<()> {
        self.send(ControllerMessage::Run(Box::new(job)))
    }

    /// Ask the controller loop to stop
    pub fn shutdown(&self) -> Result<()> {
        self.send(ControllerMessage::Shutdown)
    }
}

/// Collaborators the controller drives
pub struct NavbarServices {
    /// Wallet backend requests
    pub backend: Arc<dyn Backend>,
    /// Loading overlay widget
    pub loader: Box<dyn Loader>,
    /// Route navigation
    pub navigator: Box<dyn Navigator>,
    /// Native host process
    pub host: Arc<dyn HostBridge>,
}

/// Navigation bar controller
///
/// Owns every mutation of the shared view model. Handlers run to completion one
/// at a time on the controller thread; deferred and delayed work goes through the
/// controller's `Scheduler` and is cancelled on shutdown.
pub struct NavbarController {
    /// Controller settings
    config: NavbarConfig,
    /// Shared view model (also read by the renderer)
    view_model: SharedViewModel,
    backend: Arc<dyn Backend>,
    loader: Box<dyn Loader>,
    navigator: Box<dyn Navigator>,
    host: Arc<dyn HostBridge>,
    /// Open loading overlay, if any; never more than one
    loading_overlay: Option<Box<dyn LoaderHandle>>,
    scheduler: Scheduler,
    /// Message receiver (taken when the loop starts)
    receiver: Option<mpsc::Receiver<ControllerMessage>>,
}

impl NavbarController {
    /// Create a controller, reset the daemon state, and show the loading overlay
    ///
    /// The daemon is assumed offline until its first state update arrives.
    pub fn new(
        config: NavbarConfig,
        view_model: SharedViewModel,
        services: NavbarServices,
        receiver: mpsc::Receiver<ControllerMessage>,
    ) -> Self {
        use tracing::info;

        view_model.lock().daemon_state = DaemonState::default();
        let loading_overlay = Some(services.loader.open(&config.loading_message));
        info!("Navbar controller created, waiting for daemon state");

        Self {
            config,
            view_model,
            backend: services.backend,
            loader: services.loader,
            navigator: services.navigator,
            host: services.host,
            loading_overlay,
            scheduler: Scheduler::new(),
            receiver: Some(receiver),
        }
    }

    /// Shared view model this controller mutates
    pub fn view_model(&self) -> SharedViewModel {
        Arc::clone(&self.view_model)
    }

    /// Whether the loading overlay is currently shown
    pub fn is_loading(&self) -> bool {
        self.loading_overlay.is_some()
    }

    /// Number of deferred or delayed tasks still queued
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Sync progress of the daemon as a whole percentage
    ///
    /// `None` while the daemon has no sync range to report.
    pub fn progress_value(&self) -> Option<u8> {
        self.view_model.lock().progress_value()
    }

    /// Run deferred tasks and every delayed task that is due now
    ///
    /// The loop does this after each message; hosts that drive the controller
    /// without `run` call it themselves.
    pub fn run_pending_tasks(&mut self) -> usize {
        self.scheduler.run_due(Instant::now())
    }

    /// Run the controller loop until `Shutdown` or until every handle is dropped
    pub fn run(&mut self) {
        use std::sync::mpsc::RecvTimeoutError;
        use tracing::{info, warn};

        let Some(receiver) = self.receiver.take() else {
            warn!("Navbar event loop already running; run() call ignored");
            return;
        };

        info!("Entering navbar event loop");
        loop {
            // Block until the next message when nothing is scheduled
            let received = match self.scheduler.time_until_next(Instant::now()) {
                Some(timeout) => receiver.recv_timeout(timeout),
                None => receiver
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(message) => {
                    if self.handle_message(message).is_break() {
                        info!("Shutdown requested");
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    // Timeout is normal - a scheduled task may be due
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("All navbar handles dropped. Exiting event loop.");
                    break;
                }
            }

            self.scheduler.run_due(Instant::now());
        }

        self.shutdown();
        info!("Navbar event loop exited");
    }

    /// Move the controller to a background thread and run its loop there
    pub fn spawn_event_loop(mut self) -> std::thread::JoinHandle<()> {
        std::thread::spawn(move || self.run())
    }

    /// Cancel every pending task and close the loading overlay
    ///
    /// Called when the loop exits and when the controller is dropped.
    pub fn shutdown(&mut self) {
        use tracing::{debug, info};

        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            info!("Cancelled {} pending task(s) on shutdown", cancelled);
        }
        if let Some(overlay) = self.loading_overlay.take() {
            debug!("Closing loading overlay on shutdown");
            overlay.close();
        }
    }

    /// Apply one loop message; `Break` means the loop should stop
    fn handle_message(&mut self, message: ControllerMessage) -> ControlFlow<()> {
        use tracing::warn;

        match message {
            ControllerMessage::Event(event) => self.handle_event(event),
            ControllerMessage::OpenSafe(session) => {
                self.view_model.lock().open_safe(session);
            }
            ControllerMessage::CloseWallet(wallet_id) => {
                if let Err(e) = self.close_wallet(wallet_id) {
                    warn!("Failed to close wallet {}: {}", wallet_id, e);
                }
            }
            ControllerMessage::Run(job) => job(),
            ControllerMessage::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Apply one backend event
    pub fn handle_event(&mut self, event: BackendEvent) {
        use tracing::debug;

        debug!("Handling backend event: {}", event.name());
        match event {
            BackendEvent::UpdateDaemonState(state) => self.on_update_daemon_state(state),
            BackendEvent::UpdateWalletInfo(update) => self.on_update_wallet_info(&update),
            BackendEvent::UpdateWalletStatus(status) => self.on_update_wallet_status(status),
            BackendEvent::QuitRequested(_) => self.on_quit_requested(),
            BackendEvent::MoneyTransfer(transfer) => self.on_money_transfer(transfer),
        }
    }

    /// Toggle the loading overlay on the network state, then publish the new
    /// snapshot on the next tick.
    fn on_update_daemon_state(&mut self, state: DaemonState) {
        use tracing::{debug, info};

        let code = state.daemon_network_state.code();
        debug!(
            "Daemon state: network_state={} height={} start={} max_seen={}",
            code, state.height, state.synchronization_start_height, state.max_net_seen_height
        );

        if code == self.config.synced_network_state {
            if let Some(overlay) = self.loading_overlay.take() {
                info!("Daemon synchronized, closing loading overlay");
                overlay.close();
            }
        } else if self.loading_overlay.is_none() {
            info!("Daemon not synchronized (state {}), showing loading overlay", code);
            self.loading_overlay = Some(self.loader.open(&self.config.loading_message));
        }

        let view_model = Arc::clone(&self.view_model);
        self.scheduler.defer(move || {
            view_model.lock().daemon_state = state;
        });
    }

    /// Merge per-wallet fields into open safes, when enabled in config
    fn on_update_wallet_info(&mut self, update: &WalletInfoUpdate) {
        use tracing::debug;

        if !self.config.apply_wallet_info_updates {
            debug!(
                "Ignoring wallet info update for {} wallet(s): merging disabled",
                update.wallets.len()
            );
            return;
        }

        let mut view_model = self.view_model.lock();
        for entry in &update.wallets {
            let Some(safe) = view_model.safe_mut(entry.wallet_id) else {
                debug!("Wallet info for unknown wallet {}, skipping", entry.wallet_id);
                continue;
            };
            let written = safe.merge_known_fields(&entry.wi);
            debug!("Updated {} field(s) of wallet {}", written, entry.wallet_id);
        }
    }

    fn on_update_wallet_status(&mut self, status: WalletStatus) {
        use tracing::debug;

        debug!(
            "Wallet status update: wallet={} state={:?}",
            status.wallet_id, status.wallet_state
        );
        self.view_model
            .lock()
            .wallet_info
            .insert(status.wallet_id, status);
    }

    /// Forward the quit to the host after the configured delay
    ///
    /// Every request schedules its own forwarding; repeated requests are not
    /// coalesced.
    fn on_quit_requested(&mut self) {
        use tracing::info;

        let delay = self.config.quit_delay();
        info!("Quit requested, forwarding to host in {:?}", delay);

        let host = Arc::clone(&self.host);
        self.scheduler.delay(delay, move || {
            info!("Forwarding quit request to host");
            host.request_quit();
        });
    }

    /// Update balances and history of the safe the transfer belongs to
    fn on_money_transfer(&mut self, transfer: MoneyTransfer) {
        use tracing::{debug, warn};

        let MoneyTransfer {
            wallet_id,
            balance,
            unlocked_balance,
            ti,
        } = transfer;
        let Some(ti) = ti else {
            debug!("money_transfer for wallet {} without transfer info, ignoring", wallet_id);
            return;
        };

        let ti = {
            let mut view_model = self.view_model.lock();
            let Some(safe) = view_model.safe_mut(wallet_id) else {
                debug!("money_transfer for unknown wallet {}, ignoring", wallet_id);
                return;
            };
            safe.balance = balance;
            safe.unlocked_balance = unlocked_balance;

            if let Some(history) = safe.history.as_mut() {
                let tx_hash = ti.tx_hash.clone();
                match history::upsert_transfer(history, ti) {
                    HistoryChange::Replaced(index) => {
                        debug!("Transfer {} updated in place at {}", tx_hash, index);
                    }
                    HistoryChange::Inserted => {
                        debug!("Transfer {} added to wallet {}", tx_hash, wallet_id);
                    }
                }
                return;
            }
            ti
        };

        debug!("No transfer history for wallet {}, fetching recent transfers", wallet_id);
        let recent = match self.backend.get_recent_transfers(wallet_id) {
            Ok(recent) => recent,
            Err(e) => {
                warn!("Failed to fetch recent transfers for wallet {}: {}", wallet_id, e);
                return;
            }
        };

        let seeded = history::seed_history(recent, ti);
        let mut view_model = self.view_model.lock();
        match view_model.safe_mut(wallet_id) {
            Some(safe) => {
                debug!("Loaded {} transfer(s) for wallet {}", seeded.len(), wallet_id);
                safe.history = Some(seeded);
            }
            None => debug!("Wallet {} closed while fetching transfers", wallet_id),
        }
    }

    /// Close a wallet on the backend, drop its safe, and leave its views
    ///
    /// Nothing is removed when the backend refuses. Navigation only changes when
    /// the current route is inside the closed wallet's views.
    pub fn close_wallet(&mut self, wallet_id: u64) -> Result<()> {
        use tracing::{debug, info};

        info!("Closing wallet {}", wallet_id);
        self.backend.close_wallet(wallet_id)?;

        if self.view_model.lock().remove_safe(wallet_id).is_none() {
            debug!("Wallet {} was not among the open safes", wallet_id);
        }

        let path = self.navigator.path();
        if is_within_route(&path, &self.config.wallet_route(wallet_id)) {
            info!(
                "Current view {} belongs to closed wallet, navigating to {}",
                path, self.config.wallet_list_route
            );
            self.navigator.set_path(&self.config.wallet_list_route);
        }

        info!("Wallet {} closed", wallet_id);
        Ok(())
    }
}

impl Drop for NavbarController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
