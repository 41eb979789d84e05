use dioxus::prelude::*;

use beam_common::form::TransferForm;
use beam_common::ledger::TransactionRecord;
use beam_common::session::SessionState;

/// Wallet-sourced state shared across all components.
///
/// The effects coroutine mirrors the session engine's state in here;
/// the transfer form is edited directly by input handlers and read back
/// at submission time.
#[derive(Clone, Debug, Default)]
pub struct WalletUi {
    /// Whether a wallet extension was detected on this page.
    pub provider_available: bool,
    /// Connected account, checksummed hex.
    pub current_account: Option<String>,
    /// Transfer form, owned by the UI.
    pub form: TransferForm,
    /// True while a ledger append is awaiting confirmation.
    pub is_loading: bool,
    /// Last known ledger entry count.
    pub transaction_count: Option<u64>,
    /// Display records, in ledger order.
    pub transactions: Vec<TransactionRecord>,
    /// Last operation fault, shown inline.
    pub last_error: Option<String>,
}

impl WalletUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the session engine's state into the UI state.
    pub fn apply(&mut self, state: &SessionState) {
        self.current_account = state.current_account.map(|account| account.to_string());
        self.is_loading = state.is_loading;
        self.transaction_count = state.transaction_count;
        self.transactions = state.transactions.clone();
    }
}

pub fn use_wallet_state() -> Signal<WalletUi> {
    use_context::<Signal<WalletUi>>()
}
