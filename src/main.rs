//! `wallet-navbar` - headless host for the navbar controller
//!
//! Reads backend events as JSON lines from stdin, applies them through the
//! navbar controller, and prints the final view model as JSON when stdin closes
//! or the controller forwards a quit request.
//!
//! The line format and host commands are described in `controller::input`.

use anyhow::{Context, Result};
use std::io::BufRead;
use std::sync::{Arc, mpsc};
use tracing::{error, info, warn};
use wallet_navbar::{
    backend::InMemoryBackend,
    config::ConfigManager,
    controller::{NavbarController, NavbarHandle, NavbarServices, apply_line},
    utils,
    view::{ChannelHost, LogLoader, MemoryNavigator, Navigator, ViewModel},
};

/// Route the headless host starts on
const START_ROUTE: &str = "/safes";

fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    let config = ConfigManager::load().context("Failed to load navbar configuration")?;
    info!(
        "Configuration loaded (quit delay {} ms, synced state {})",
        config.quit_delay_ms, config.synced_network_state
    );

    let view_model = ViewModel::shared();
    let backend = Arc::new(InMemoryBackend::new());
    let navigator = MemoryNavigator::new(START_ROUTE);
    let (quit_tx, quit_rx) = mpsc::channel();
    let (handle, receiver) = NavbarHandle::channel();

    let controller = NavbarController::new(
        config,
        Arc::clone(&view_model),
        NavbarServices {
            backend: Arc::clone(&backend) as _,
            loader: Box::new(LogLoader),
            navigator: Box::new(navigator.clone()),
            host: Arc::new(ChannelHost::with_sender(quit_tx.clone())),
        },
        receiver,
    );

    info!("Starting navbar controller thread");
    let controller_thread = controller.spawn_event_loop();

    let reader_handle = handle.clone();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to read stdin: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            if let Err(e) = apply_line(&line, &reader_handle, &backend) {
                warn!("Skipping input line: {:#}", e);
                eprintln!("wallet-navbar: {e:#}");
            }
        }
        info!("Input closed");
        let _ = quit_tx.send(());
    });

    // Either stdin closed or the controller forwarded a quit request
    let _ = quit_rx.recv();

    info!("Stopping navbar controller");
    if let Err(e) = handle.shutdown() {
        warn!("Controller already stopped: {}", e);
    }
    if controller_thread.join().is_err() {
        error!("Navbar controller thread panicked");
    }

    let snapshot = serde_json::json!({
        "route": navigator.path(),
        "view_model": &*view_model.lock(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize view model")?
    );

    info!("wallet-navbar shutting down");
    Ok(())
}
