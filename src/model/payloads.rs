//! Backend event payloads and request responses

use crate::model::wallet::TransferRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload of `money_transfer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyTransfer {
    /// Wallet the transfer belongs to
    pub wallet_id: u64,
    /// New total balance
    #[serde(default)]
    pub balance: u64,
    /// New spendable balance
    #[serde(default)]
    pub unlocked_balance: u64,
    /// Transfer info; events without it carry nothing to apply
    #[serde(default)]
    pub ti: Option<TransferRecord>,
}

/// Payload of `update_wallet_info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletInfoUpdate {
    /// Per-wallet field updates
    #[serde(default)]
    pub wallets: Vec<WalletInfoEntry>,
}

/// One wallet's entry in `update_wallet_info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletInfoEntry {
    /// Wallet the fields belong to
    pub wallet_id: u64,
    /// Field values keyed by field name
    #[serde(default)]
    pub wi: Map<String, Value>,
}

/// Payload of `update_wallet_status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletStatus {
    /// Wallet the status belongs to
    pub wallet_id: u64,
    /// Backend wallet state code
    #[serde(default)]
    pub wallet_state: Option<u8>,
    /// Remaining status fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the `getRecentTransfers` backend request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentTransfers {
    /// Confirmed transfers, newest first
    #[serde(default)]
    pub history: Vec<TransferRecord>,
    /// Transfers still waiting for a block, newest first
    #[serde(default)]
    pub unconfirmed: Option<Vec<TransferRecord>>,
}
