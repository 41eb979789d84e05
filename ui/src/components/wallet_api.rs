use dioxus::prelude::*;

/// Actions the UI can send to the chain via the coroutine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletAction {
    /// Prompt the wallet extension for account authorization.
    Connect,
    /// Re-read the full transaction history from the contract.
    RefreshTransactions,
    /// Submit the current form as a value transfer plus ledger append.
    SubmitTransfer,
}

/// Get a handle to send actions to the chain communication coroutine.
pub fn use_wallet_action() -> Coroutine<WalletAction> {
    use_coroutine_handle::<WalletAction>()
}

/// Start the chain communication coroutine.
///
/// In WASM builds this talks to the injected EIP-1193 provider and the
/// ledger contract; on native builds it acts as a logging sink.
pub fn use_wallet_coroutine() {
    #[cfg(not(target_family = "wasm"))]
    {
        use_coroutine(|mut rx: UnboundedReceiver<WalletAction>| async move {
            use futures::StreamExt;
            while let Some(action) = rx.next().await {
                tracing::debug!("wallet action (no chain in native build): {:?}", action);
            }
        });
    }

    #[cfg(target_family = "wasm")]
    {
        use_coroutine(|rx: UnboundedReceiver<WalletAction>| wasm_impl::wallet_comms(rx));
    }
}

// ─── WASM implementation ─────────────────────────────────────────────────────

#[cfg(target_family = "wasm")]
mod wasm_impl {
    use dioxus::prelude::*;
    use futures::StreamExt;

    use beam_common::chain::{ChainAccess, WalletError};
    use beam_common::session::{SessionState, WalletSession};

    use super::WalletAction;
    use crate::components::wallet_state::{use_wallet_state, WalletUi};
    use crate::eth::contract::{ledger_address, LedgerBinding};
    use crate::eth::provider::Eip1193Provider;
    use crate::eth::storage::BrowserCountStore;

    const INSTALL_PROMPT: &str = "Please install MetaMask.";

    /// Surface the environment-missing fault as a browser alert.
    fn install_alert() {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(INSTALL_PROMPT);
        }
    }

    fn mirror(ui: &mut Signal<WalletUi>, state: &SessionState) {
        ui.write().apply(state);
    }

    /// Record an operation fault; the environment-missing fault alerts
    /// instead of propagating.
    fn surface(ui: &mut Signal<WalletUi>, err: WalletError) {
        match err {
            WalletError::ProviderMissing => install_alert(),
            other => {
                tracing::error!("wallet operation failed: {other}");
                ui.write().last_error = Some(other.to_string());
            }
        }
    }

    /// Main chain communication loop.
    pub async fn wallet_comms(mut rx: UnboundedReceiver<WalletAction>) {
        let mut ui = use_wallet_state();

        let chain = Eip1193Provider::detect().map(|provider| ChainAccess {
            ledger: LedgerBinding::new(provider.clone(), ledger_address()),
            wallet: provider,
        });
        let mut session = WalletSession::new(chain, BrowserCountStore::new());
        ui.write().provider_available = session.has_provider();
        mirror(&mut ui, session.state());

        // Startup hydration: adopt an already-authorized account, load
        // the history, and sync the persisted count.
        if let Err(err) = session.hydrate().await {
            surface(&mut ui, err);
        }
        mirror(&mut ui, session.state());

        while let Some(action) = rx.next().await {
            ui.write().last_error = None;
            match action {
                WalletAction::Connect => {
                    if let Err(err) = session.connect_wallet().await {
                        surface(&mut ui, err);
                    }
                }
                WalletAction::RefreshTransactions => {
                    // A failed refresh keeps the previous list visible.
                    if let Err(err) = session.refresh_transactions().await {
                        surface(&mut ui, err);
                    }
                }
                WalletAction::SubmitTransfer => {
                    let form = ui.read().form.clone();
                    let result = session
                        .send_transaction(&form, |state| {
                            let mut ui = ui;
                            ui.write().apply(state);
                        })
                        .await;
                    match result {
                        Ok(tx_hash) => tracing::info!("transfer confirmed: {tx_hash}"),
                        Err(err) => surface(&mut ui, err),
                    }
                }
            }
            mirror(&mut ui, session.state());
        }
    }
}
