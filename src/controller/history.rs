//! Transfer history merging
//!
//! Histories are ordered newest first and hold at most one record per `tx_hash`.

use crate::model::{RecentTransfers, TransferRecord};
use std::collections::HashSet;

/// What `upsert_transfer` did with the incoming record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryChange {
    /// A record with the same hash was replaced at this index
    Replaced(usize),
    /// The record was new and was inserted at the front
    Inserted,
}

/// Apply a transfer to an existing history
///
/// A record with the same `tx_hash` is replaced in place, keeping its position
/// (e.g. a confirmation count update). Otherwise the transfer is the newest and
/// goes to the front.
pub fn upsert_transfer(history: &mut Vec<TransferRecord>, transfer: TransferRecord) -> HistoryChange {
    let Some(index) = history
        .iter()
        .position(|record| record.tx_hash == transfer.tx_hash)
    else {
        history.insert(0, transfer);
        return HistoryChange::Inserted;
    };

    // Drop later duplicates so the hash stays unique.
    let tx_hash = transfer.tx_hash.clone();
    history[index] = transfer;
    let mut seen_at = 0;
    history.retain(|record| {
        let keep = record.tx_hash != tx_hash || seen_at == index;
        seen_at += 1;
        keep
    });
    HistoryChange::Replaced(index)
}

/// Build the first history of a safe from a backend response and the transfer
/// that triggered the fetch
///
/// Order: `transfer`, then unconfirmed records, then confirmed history. The
/// backend may already list `transfer`; only the first occurrence of each hash
/// is kept.
pub fn seed_history(recent: RecentTransfers, transfer: TransferRecord) -> Vec<TransferRecord> {
    let unconfirmed = recent.unconfirmed.unwrap_or_default();
    let mut seen = HashSet::with_capacity(1 + unconfirmed.len() + recent.history.len());

    std::iter::once(transfer)
        .chain(unconfirmed)
        .chain(recent.history)
        .filter(|record| seen.insert(record.tx_hash.clone()))
        .collect()
}
