//! Backend bridge module
//!
//! The backend bridge owns the connection to the wallet daemon. This module defines
//! the two directions the navbar controller talks to it through:
//!
//! - **Inbound events**: `BackendEvent`, decoded from the bridge's named events
//! - **Outbound requests**: the `Backend` trait (`closeWallet`, `getRecentTransfers`)
//!
//! `InMemoryBackend` answers requests from in-process tables and is used by the
//! headless host and the tests.

pub mod events;
pub mod memory;

pub use events::{BackendEvent, EventEnvelope};
pub use memory::{BackendRequest, InMemoryBackend};

use crate::error::Result;
use crate::model::RecentTransfers;

/// Requests the controller sends to the wallet backend
///
/// Calls are made from the controller thread and block it until the bridge answers.
pub trait Backend: Send + Sync {
    /// Close the wallet on the backend side
    fn close_wallet(&self, wallet_id: u64) -> Result<()>;

    /// Fetch the most recent transfers of a wallet
    fn get_recent_transfers(&self, wallet_id: u64) -> Result<RecentTransfers>;
}
