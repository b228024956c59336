//! `wallet-navbar` - Navigation bar controller for the wallet desktop UI
//!
//! Binds the backend event stream (daemon sync state, wallet balance and history
//! updates, quit requests) to the shared view model read by the rendering layer.
//! A single `NavbarController` thread owns every mutation; the rendering layer only
//! reads snapshots of the `ViewModel`.
//!
//! # Event Flow
//!
//! ```text
//! Backend → BackendEvent → NavbarController → ViewModel → renderer
//!                               ↓        ↓
//!                  Loader / Navigator   HostBridge (quit)
//! ```

// Module declarations
pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod utils;
pub mod view;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{NavbarError, Result};
