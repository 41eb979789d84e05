use alloy::primitives::{Address, U256};

use crate::ledger::RawLedgerEntry;

/// Gas budget for a plain value transfer.
pub const TRANSFER_GAS: u64 = 21_000;

/// Errors from wallet, contract, or storage operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletError {
    /// No wallet extension was detected in the environment.
    ProviderMissing,
    /// An operation that needs a connected account ran without one.
    NotConnected,
    /// The user-supplied amount string could not be parsed into base units.
    InvalidAmount(String),
    /// The user-supplied recipient is not a valid address.
    InvalidRecipient(String),
    /// The wallet provider rejected or failed a request.
    Provider(String),
    /// A contract call failed or reverted.
    Contract(String),
    /// The durable count store could not be written.
    Storage(String),
}

impl std::fmt::Display for WalletError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProviderMissing => write!(f, "no wallet provider detected"),
            Self::NotConnected => write!(f, "no account connected"),
            Self::InvalidAmount(raw) => write!(f, "invalid amount: {raw:?}"),
            Self::InvalidRecipient(raw) => write!(f, "invalid recipient: {raw:?}"),
            Self::Provider(msg) => write!(f, "wallet provider: {msg}"),
            Self::Contract(msg) => write!(f, "contract: {msg}"),
            Self::Storage(msg) => write!(f, "storage: {msg}"),
        }
    }
}

/// A native value transfer submitted through the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    /// Base units (wei).
    pub value: U256,
    pub gas: u64,
}

/// A record to append to the on-chain ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerAppend {
    pub from: Address,
    pub to: Address,
    /// Base units (wei).
    pub amount: U256,
    pub message: String,
    pub keyword: String,
}

/// Browser wallet capability (the injected EIP-1193 provider in the app,
/// a double in tests).
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Accounts the user has already authorized for this origin.
    async fn accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Prompt the user to authorize one or more accounts.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Submit a native value transfer; returns the transaction hash.
    async fn send_transfer(&self, request: &TransferRequest) -> Result<String, WalletError>;
}

/// An in-flight ledger append, resolvable to a confirmation.
#[allow(async_fn_in_trait)]
pub trait PendingEntry {
    /// Hash of the submitted transaction.
    fn tx_hash(&self) -> &str;

    /// Suspend until the append is confirmed on chain.
    async fn confirmed(self) -> Result<(), WalletError>;
}

/// Contract binding capability: the append-only transaction ledger.
#[allow(async_fn_in_trait)]
pub trait TransactionLedger {
    type Pending: PendingEntry;

    /// All stored entries, in ledger order.
    async fn entries(&self) -> Result<Vec<RawLedgerEntry>, WalletError>;

    /// Append a record, returning a pending-submission handle.
    async fn append(&self, entry: &LedgerAppend) -> Result<Self::Pending, WalletError>;

    /// Total number of stored entries.
    async fn entry_count(&self) -> Result<u64, WalletError>;
}

/// Durable key-value persistence for the transaction counter.
pub trait CountStore {
    fn load(&self) -> Option<u64>;
    fn save(&mut self, count: u64) -> Result<(), WalletError>;
}

/// Wallet + ledger pair, present only when a provider was detected.
#[derive(Clone, Debug)]
pub struct ChainAccess<W, L> {
    pub wallet: W,
    pub ledger: L,
}
