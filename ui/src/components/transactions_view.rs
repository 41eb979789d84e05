use dioxus::prelude::*;

use super::wallet_api::{use_wallet_action, WalletAction};
use super::wallet_state::use_wallet_state;

#[component]
pub fn TransactionsView() -> Element {
    let wallet = use_wallet_state();
    let node = use_wallet_action();

    let state = wallet.read();
    let transactions = state.transactions.clone();
    let count = state.transaction_count;
    drop(state);

    rsx! {
        div { class: "transactions-view",
            div { class: "transactions-header",
                h2 { "Latest Transactions" }
                if let Some(count) = count {
                    span { class: "tx-count", "{count} on the ledger" }
                }
                button {
                    class: "refresh-btn",
                    onclick: move |_| node.send(WalletAction::RefreshTransactions),
                    "Refresh"
                }
            }
            if transactions.is_empty() {
                p { class: "empty-desc", "No transactions yet." }
            } else {
                table { class: "tx-history",
                    thead {
                        tr {
                            th { "Time" }
                            th { "From" }
                            th { "To" }
                            th { "Amount" }
                            th { "Message" }
                            th { "Keyword" }
                        }
                    }
                    tbody {
                        // Newest entries first.
                        for tx in transactions.iter().rev() {
                            tr {
                                td { class: "tx-time", "{tx.timestamp}" }
                                td { class: "tx-addr", "{tx.address_from}" }
                                td { class: "tx-addr", "{tx.address_to}" }
                                td { class: "tx-amount", "{tx.amount}" }
                                td { "{tx.message}" }
                                td { class: "tx-keyword", "{tx.keyword}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
