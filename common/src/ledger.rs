use alloy::primitives::{Address, U256};
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::units::format_amount;

/// One raw entry from the on-chain ledger, as decoded by the contract
/// binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLedgerEntry {
    pub sender: Address,
    pub receiver: Address,
    /// Seconds since the epoch.
    pub timestamp: u64,
    pub message: String,
    pub keyword: String,
    /// Base units (wei).
    pub amount: U256,
}

/// Display-ready transaction record derived from a raw ledger entry.
/// Never mutated after creation; the list it lives in is replaced
/// wholesale on each fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub address_from: String,
    pub address_to: String,
    pub timestamp: String,
    pub message: String,
    pub keyword: String,
    pub amount: String,
}

impl TransactionRecord {
    /// Pure transform from a raw entry; idempotent, no hidden state.
    pub fn from_raw(raw: &RawLedgerEntry) -> Self {
        Self {
            address_from: raw.sender.to_string(),
            address_to: raw.receiver.to_string(),
            timestamp: format_timestamp(raw.timestamp),
            message: raw.message.clone(),
            keyword: raw.keyword.clone(),
            amount: format_amount(raw.amount),
        }
    }
}

/// Format integer seconds-since-epoch for display, e.g. "26/8/2021, 17:46:40".
pub fn format_timestamp(secs: u64) -> String {
    match DateTime::from_timestamp(secs as i64, 0) {
        Some(dt) => dt.format("%-d/%-m/%Y, %H:%M:%S").to_string(),
        None => secs.to_string(),
    }
}
