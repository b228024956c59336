//! View-model records and backend payloads
//!
//! Field names follow the backend's JSON contract so payloads decode with serde
//! directly. Fields the controller does not interpret are preserved in `extra`
//! maps and passed through to the renderer untouched.

pub mod daemon;
pub mod payloads;
pub mod wallet;

pub use daemon::{DaemonState, NetworkState};
pub use payloads::{MoneyTransfer, RecentTransfers, WalletInfoEntry, WalletInfoUpdate, WalletStatus};
pub use wallet::{TransferRecord, WalletSession};
