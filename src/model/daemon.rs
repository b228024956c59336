//! Daemon synchronization state

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Network state reported by the daemon
///
/// Encoded as a bare integer on the wire. Codes outside the known range are kept
/// as `Unknown` so they survive a round trip to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum NetworkState {
    /// Connecting to peers, or offline
    #[default]
    Connecting,
    /// Downloading blocks
    Synchronizing,
    /// Fully synchronized with the network
    Online,
    /// Core is loading the blockchain database
    LoadingCore,
    /// Daemon reported an internal error
    InternalError,
    /// Core is shutting down
    UnloadingCore,
    /// Any other code
    Unknown(u8),
}

impl NetworkState {
    /// Wire code of this state
    pub fn code(self) -> u8 {
        u8::from(self)
    }
}

impl From<u8> for NetworkState {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Connecting,
            1 => Self::Synchronizing,
            2 => Self::Online,
            3 => Self::LoadingCore,
            4 => Self::InternalError,
            5 => Self::UnloadingCore,
            other => Self::Unknown(other),
        }
    }
}

impl From<NetworkState> for u8 {
    fn from(state: NetworkState) -> Self {
        match state {
            NetworkState::Connecting => 0,
            NetworkState::Synchronizing => 1,
            NetworkState::Online => 2,
            NetworkState::LoadingCore => 3,
            NetworkState::InternalError => 4,
            NetworkState::UnloadingCore => 5,
            NetworkState::Unknown(code) => code,
        }
    }
}

/// Snapshot of the daemon's sync state, replaced wholesale on every update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaemonState {
    /// Current network state
    #[serde(default)]
    pub daemon_network_state: NetworkState,
    /// Height of the local chain
    #[serde(default)]
    pub height: u64,
    /// Height at which the current synchronization started
    #[serde(default)]
    pub synchronization_start_height: u64,
    /// Highest height announced by peers
    #[serde(default)]
    pub max_net_seen_height: u64,
    /// Remaining daemon fields (peer counts, hashrate, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DaemonState {
    /// Sync progress as a whole percentage
    ///
    /// Returns `None` when the peers' height does not exceed the start height,
    /// since there is no range to measure against. A local height outside the
    /// range is clamped, so the result is always within `0..=100`.
    pub fn progress_percent(&self) -> Option<u8> {
        let start = self.synchronization_start_height;
        if self.max_net_seen_height <= start {
            return None;
        }

        let span = u128::from(self.max_net_seen_height - start);
        let done = u128::from(self.height.saturating_sub(start)).min(span);
        u8::try_from(done * 100 / span).ok()
    }
}
