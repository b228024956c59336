//! Wallet sessions ("safes") and their transfer history

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single transaction as shown in a safe's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Transaction hash, unique within a safe's history
    pub tx_hash: String,
    /// Amount in atomic units
    #[serde(default)]
    pub amount: u64,
    /// Whether the transfer credited this wallet
    #[serde(default)]
    pub is_income: bool,
    /// Block height, 0 while unconfirmed
    #[serde(default)]
    pub height: u64,
    /// Unix timestamp
    #[serde(default)]
    pub timestamp: u64,
    /// Confirmation count, when the backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
    /// Remaining transfer fields (payment id, fee, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransferRecord {
    /// Create a record carrying only its hash
    pub fn new(tx_hash: impl Into<String>) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            amount: 0,
            is_income: false,
            height: 0,
            timestamp: 0,
            confirmations: None,
            extra: Map::new(),
        }
    }
}

/// An open wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSession {
    /// Backend wallet identifier
    pub wallet_id: u64,
    /// Total balance in atomic units
    #[serde(default)]
    pub balance: u64,
    /// Spendable balance in atomic units
    #[serde(default)]
    pub unlocked_balance: u64,
    /// Transfer history, newest first. `None` until it has been fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<TransferRecord>>,
    /// Remaining wallet fields (name, path, address, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WalletSession {
    /// Create a session with zero balances and no history loaded
    pub fn new(wallet_id: u64) -> Self {
        Self {
            wallet_id,
            balance: 0,
            unlocked_balance: 0,
            history: None,
            extra: Map::new(),
        }
    }

    /// Overwrite the fields this session already has with values from `info`
    ///
    /// Fields the session does not carry are ignored, as are `wallet_id` and
    /// `history`. Returns the number of fields written.
    pub fn merge_known_fields(&mut self, info: &Map<String, Value>) -> usize {
        let mut written = 0;
        for (field, value) in info {
            match field.as_str() {
                "wallet_id" | "history" => {}
                "balance" => {
                    if let Some(balance) = value.as_u64() {
                        self.balance = balance;
                        written += 1;
                    }
                }
                "unlocked_balance" => {
                    if let Some(balance) = value.as_u64() {
                        self.unlocked_balance = balance;
                        written += 1;
                    }
                }
                _ => {
                    if let Some(slot) = self.extra.get_mut(field) {
                        *slot = value.clone();
                        written += 1;
                    }
                }
            }
        }
        written
    }
}
