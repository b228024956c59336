//! Navbar controller module
//!
//! This module binds backend events to the shared view model and drives the
//! loading overlay, navigation, and the host's quit request.
//!
//! # Overview
//!
//! The navbar controller is the single writer of the view model. It:
//! - **Tracks daemon sync state** and shows the loading overlay until the daemon
//!   reports the synced network state
//! - **Keeps open safes current** with balances and transfer history
//! - **Records wallet status** reported by the backend
//! - **Forwards quit requests** to the native host after a delay
//! - **Closes wallets** on behalf of other views and leaves their routes
//!
//! # Architecture
//!
//! - `NavbarController`: owns the handlers and runs them one at a time
//! - `NavbarHandle`: cloneable sender other threads use to reach the controller
//! - `Scheduler`: deferred (next tick) and delayed tasks, cancelled on shutdown
//! - `history`: newest-first transfer history with one record per `tx_hash`
//! - `input`: JSON-lines input of the headless host, queued as controller messages
//!
//! # Event Flow
//!
//! ```text
//! Backend bridge → BackendEvent → NavbarHandle → NavbarController → ViewModel
//!                                                      ↓
//!                                     Loader / Navigator / HostBridge
//! ```
//!
//! # Loading Overlay
//!
//! One overlay is open while the daemon is not synced:
//!
//! 1. Synced state arrives with an overlay open: close it
//! 2. Any other state arrives with no overlay open: open one
//! 3. Otherwise nothing changes; repeated states never stack overlays

pub mod history;
pub mod input;
pub mod navbar_controller;
pub mod scheduler;

pub use history::{HistoryChange, seed_history, upsert_transfer};
pub use input::apply_line;
pub use navbar_controller::{ControllerMessage, NavbarController, NavbarHandle, NavbarServices};
pub use scheduler::{Scheduler, TaskHandle};
