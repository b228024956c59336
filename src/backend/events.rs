//! Named backend events and their decoding

use crate::error::{NavbarError, Result};
use crate::model::{DaemonState, MoneyTransfer, WalletInfoUpdate, WalletStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events the navbar controller subscribes to
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// `update_daemon_state`: new daemon sync snapshot
    UpdateDaemonState(DaemonState),
    /// `update_wallet_info`: per-wallet field updates
    UpdateWalletInfo(WalletInfoUpdate),
    /// `update_wallet_status`: wallet state change
    UpdateWalletStatus(WalletStatus),
    /// `quit_requested`: the host asked the UI to quit; payload is not interpreted
    QuitRequested(Value),
    /// `money_transfer`: balance change with optional transfer info
    MoneyTransfer(MoneyTransfer),
}

impl BackendEvent {
    /// Names of every subscribed event
    pub const NAMES: [&'static str; 5] = [
        "update_daemon_state",
        "update_wallet_info",
        "update_wallet_status",
        "quit_requested",
        "money_transfer",
    ];

    /// Wire name of this event
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateDaemonState(_) => "update_daemon_state",
            Self::UpdateWalletInfo(_) => "update_wallet_info",
            Self::UpdateWalletStatus(_) => "update_wallet_status",
            Self::QuitRequested(_) => "quit_requested",
            Self::MoneyTransfer(_) => "money_transfer",
        }
    }

    /// Decode an event from its name and JSON payload
    pub fn from_named(name: &str, data: Value) -> Result<Self> {
        match name {
            "update_daemon_state" => decode(name, data).map(Self::UpdateDaemonState),
            "update_wallet_info" => decode(name, data).map(Self::UpdateWalletInfo),
            "update_wallet_status" => decode(name, data).map(Self::UpdateWalletStatus),
            "quit_requested" => Ok(Self::QuitRequested(data)),
            "money_transfer" => decode(name, data).map(Self::MoneyTransfer),
            other => Err(NavbarError::UnknownEvent(other.to_string())),
        }
    }
}

fn decode<T: DeserializeOwned>(event: &str, data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|source| NavbarError::InvalidPayload {
        event: event.to_string(),
        source,
    })
}

/// A named event as it travels over a text transport
///
/// `{"event": "money_transfer", "data": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event name
    pub event: String,
    /// Event payload
    #[serde(default)]
    pub data: Value,
}

impl EventEnvelope {
    /// Parse one line of text into an envelope
    pub fn parse(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }

    /// Decode the payload into a typed event
    pub fn into_event(self) -> Result<BackendEvent> {
        BackendEvent::from_named(&self.event, self.data)
    }
}
