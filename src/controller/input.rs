//! JSON-lines input of the headless host
//!
//! Each line is `{"event": "<name>", "data": {...}}`. Backend event names are
//! decoded into `BackendEvent`s. A few extra names stand in for the rest of the UI:
//!
//! - `open_safe`: add a wallet session (`data` is the session)
//! - `recent_transfers`: script the backend's `getRecentTransfers` answer
//!   (`data` is `{"wallet_id": .., "history": [..], "unconfirmed": [..]}`)
//! - `close_wallet`: close a wallet (`data` is `{"wallet_id": ..}`)
//!
//! Every line becomes one controller message, so lines take effect in input order.

use crate::backend::{EventEnvelope, InMemoryBackend};
use crate::controller::NavbarHandle;
use crate::error::{NavbarError, Result};
use crate::model::{RecentTransfers, WalletSession};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct WalletRef {
    wallet_id: u64,
}

#[derive(Debug, Deserialize)]
struct ScriptedTransfers {
    wallet_id: u64,
    #[serde(flatten)]
    recent: RecentTransfers,
}

fn payload<T: DeserializeOwned>(event: &str, data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|source| NavbarError::InvalidPayload {
        event: event.to_string(),
        source,
    })
}

/// Parse one input line and queue it on the controller
pub fn apply_line(line: &str, handle: &NavbarHandle, backend: &Arc<InMemoryBackend>) -> Result<()> {
    let envelope = EventEnvelope::parse(line)?;

    match envelope.event.as_str() {
        "open_safe" => {
            let session: WalletSession = payload(&envelope.event, envelope.data)?;
            handle.open_safe(session)
        }
        "recent_transfers" => {
            let scripted: ScriptedTransfers = payload(&envelope.event, envelope.data)?;
            let backend = Arc::clone(backend);
            handle.run_on_controller(move || {
                backend.set_recent_transfers(scripted.wallet_id, scripted.recent);
            })
        }
        "close_wallet" => {
            let wallet: WalletRef = payload(&envelope.event, envelope.data)?;
            handle.close_wallet(wallet.wallet_id)
        }
        _ => handle.dispatch(envelope.into_event()?),
    }
}
