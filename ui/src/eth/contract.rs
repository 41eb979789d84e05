//! ABI-bound calls against the deployed transaction ledger contract,
//! routed through the wallet provider's JSON-RPC surface.

use alloy::primitives::{hex, Address, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use serde::Serialize;
use wasm_bindgen::JsValue;

use beam_common::chain::{LedgerAppend, PendingEntry, TransactionLedger, WalletError};
use beam_common::ledger::RawLedgerEntry;

use super::provider::Eip1193Provider;

sol! {
    /// One stored transfer, as laid out by the deployed contract.
    struct TransferStruct {
        address sender;
        address receiver;
        uint256 amount;
        string message;
        uint256 timestamp;
        string keyword;
    }

    function getAllTransactions() external view returns (TransferStruct[] memory);
    function getTransactionCount() external view returns (uint256);
    function addToBlockchain(address receiver, uint256 amount, string message, string keyword) external;
}

/// First-deploy address on a local dev chain; override for real networks.
const DEFAULT_LEDGER_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Deployed contract address, overridable at compile time via
/// `BEAM_LEDGER_ADDRESS`.
pub fn ledger_address() -> Address {
    let configured = option_env!("BEAM_LEDGER_ADDRESS").unwrap_or(DEFAULT_LEDGER_ADDRESS);
    match configured.parse() {
        Ok(address) => address,
        Err(_) => {
            tracing::warn!("bad ledger address {configured:?}, falling back to zero");
            Address::ZERO
        }
    }
}

/// Receipt poll cadence and budget for confirmation waiting.
const CONFIRM_POLL_MS: u32 = 2_000;
const CONFIRM_POLL_LIMIT: u32 = 150;

/// Ledger contract binding that routes calls through the wallet provider.
#[derive(Clone)]
pub struct LedgerBinding {
    provider: Eip1193Provider,
    address: Address,
}

/// Parameter object for `eth_call`.
#[derive(Serialize)]
struct EthCall {
    to: String,
    data: String,
}

/// Parameter object for contract-invoking `eth_sendTransaction`.
#[derive(Serialize)]
struct EthContractTransaction {
    from: String,
    to: String,
    data: String,
}

impl LedgerBinding {
    pub fn new(provider: Eip1193Provider, address: Address) -> Self {
        Self { provider, address }
    }

    /// `eth_call` with ABI-encoded calldata; returns the raw return bytes.
    async fn call(&self, data: Vec<u8>) -> Result<Vec<u8>, WalletError> {
        let call = EthCall {
            to: self.address.to_string(),
            data: hex::encode_prefixed(data),
        };
        let call = serde_wasm_bindgen::to_value(&call)
            .map_err(|e| WalletError::Contract(format!("encode call: {e}")))?;
        let params = js_sys::Array::of2(&call, &JsValue::from_str("latest"));
        let result = self
            .provider
            .request("eth_call", params.into())
            .await
            .map_err(contract_fault)?;
        let text = result
            .as_string()
            .ok_or_else(|| WalletError::Contract("eth_call returned no data".into()))?;
        hex::decode(&text).map_err(|e| WalletError::Contract(format!("bad return data: {e}")))
    }

    /// State-changing contract call signed by `from`; returns the tx hash.
    async fn send(&self, from: Address, data: Vec<u8>) -> Result<String, WalletError> {
        let tx = EthContractTransaction {
            from: from.to_string(),
            to: self.address.to_string(),
            data: hex::encode_prefixed(data),
        };
        let tx = serde_wasm_bindgen::to_value(&tx)
            .map_err(|e| WalletError::Contract(format!("encode transaction: {e}")))?;
        let params = js_sys::Array::of1(&tx);
        let result = self
            .provider
            .request("eth_sendTransaction", params.into())
            .await
            .map_err(contract_fault)?;
        result
            .as_string()
            .ok_or_else(|| WalletError::Contract("eth_sendTransaction returned no hash".into()))
    }
}

/// Re-tag provider-level faults raised while performing contract work.
fn contract_fault(err: WalletError) -> WalletError {
    match err {
        WalletError::Provider(msg) => WalletError::Contract(msg),
        other => other,
    }
}

/// Pending ledger append; confirmed once a receipt shows up.
pub struct PendingAppend {
    provider: Eip1193Provider,
    tx_hash: String,
}

impl PendingEntry for PendingAppend {
    fn tx_hash(&self) -> &str {
        &self.tx_hash
    }

    async fn confirmed(self) -> Result<(), WalletError> {
        for _ in 0..CONFIRM_POLL_LIMIT {
            gloo_timers::future::TimeoutFuture::new(CONFIRM_POLL_MS).await;
            let params = js_sys::Array::of1(&JsValue::from_str(&self.tx_hash));
            let receipt = self
                .provider
                .request("eth_getTransactionReceipt", params.into())
                .await
                .map_err(contract_fault)?;
            if !receipt.is_null() && !receipt.is_undefined() {
                return Ok(());
            }
        }
        Err(WalletError::Contract(format!(
            "no receipt for {} after {} polls",
            self.tx_hash, CONFIRM_POLL_LIMIT
        )))
    }
}

impl TransactionLedger for LedgerBinding {
    type Pending = PendingAppend;

    async fn entries(&self) -> Result<Vec<RawLedgerEntry>, WalletError> {
        let data = self.call(getAllTransactionsCall {}.abi_encode()).await?;
        let transfers = getAllTransactionsCall::abi_decode_returns(&data)
            .map_err(|e| WalletError::Contract(format!("decode transactions: {e}")))?;
        Ok(transfers.iter().map(raw_entry).collect())
    }

    async fn append(&self, entry: &LedgerAppend) -> Result<PendingAppend, WalletError> {
        let call = addToBlockchainCall {
            receiver: entry.to,
            amount: entry.amount,
            message: entry.message.clone(),
            keyword: entry.keyword.clone(),
        };
        let tx_hash = self.send(entry.from, call.abi_encode()).await?;
        Ok(PendingAppend {
            provider: self.provider.clone(),
            tx_hash,
        })
    }

    async fn entry_count(&self) -> Result<u64, WalletError> {
        let data = self.call(getTransactionCountCall {}.abi_encode()).await?;
        let count: U256 = getTransactionCountCall::abi_decode_returns(&data)
            .map_err(|e| WalletError::Contract(format!("decode count: {e}")))?;
        Ok(count.saturating_to::<u64>())
    }
}

fn raw_entry(transfer: &TransferStruct) -> RawLedgerEntry {
    RawLedgerEntry {
        sender: transfer.sender,
        receiver: transfer.receiver,
        timestamp: transfer.timestamp.saturating_to::<u64>(),
        message: transfer.message.clone(),
        keyword: transfer.keyword.clone(),
        amount: transfer.amount,
    }
}
