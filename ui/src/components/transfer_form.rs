use dioxus::prelude::*;

use beam_common::form::FormField;

use super::wallet_api::{use_wallet_action, WalletAction};
use super::wallet_state::use_wallet_state;

#[component]
pub fn TransferFormView() -> Element {
    let mut wallet = use_wallet_state();
    let node = use_wallet_action();

    let state = wallet.read();
    let form = state.form.clone();
    let is_loading = state.is_loading;
    let connected = state.current_account.is_some();
    let last_error = state.last_error.clone();
    drop(state);

    let can_submit = connected
        && !is_loading
        && !form.address_to.trim().is_empty()
        && !form.amount.trim().is_empty();

    rsx! {
        div { class: "transfer-form",
            h2 { "Send a Transfer" }
            div { class: "form-group",
                label { "Recipient address" }
                input {
                    r#type: "text",
                    placeholder: "0x...",
                    value: "{form.address_to}",
                    oninput: move |e| wallet.write().form.set(FormField::AddressTo, e.value()),
                }
            }
            div { class: "form-group",
                label { "Amount (ETH)" }
                input {
                    r#type: "text",
                    placeholder: "0.001",
                    value: "{form.amount}",
                    oninput: move |e| wallet.write().form.set(FormField::Amount, e.value()),
                }
            }
            div { class: "form-group",
                label { "Keyword (GIF)" }
                input {
                    r#type: "text",
                    placeholder: "rocket",
                    value: "{form.keyword}",
                    oninput: move |e| wallet.write().form.set(FormField::Keyword, e.value()),
                }
            }
            div { class: "form-group",
                label { "Message" }
                input {
                    r#type: "text",
                    placeholder: "Enter message",
                    value: "{form.message}",
                    oninput: move |e| wallet.write().form.set(FormField::Message, e.value()),
                }
            }
            button {
                class: "send-btn",
                disabled: !can_submit,
                onclick: move |_| node.send(WalletAction::SubmitTransfer),
                if is_loading { "Waiting for confirmation..." } else { "Send Now" }
            }
            if let Some(err) = last_error {
                p { class: "field-error", "{err}" }
            }
            if !connected {
                p { class: "hint", "Connect your wallet to send a transfer." }
            }
        }
    }
}
