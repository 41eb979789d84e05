use dioxus::prelude::*;

use super::wallet_api::{use_wallet_action, WalletAction};
use super::wallet_state::use_wallet_state;

/// Shorten a hex address for display ("0xd8dA…6045").
fn short_address(address: &str) -> String {
    if address.len() > 10 {
        format!("{}…{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

#[component]
pub fn ConnectBar() -> Element {
    let wallet = use_wallet_state();
    let node = use_wallet_action();

    let state = wallet.read();
    let provider_available = state.provider_available;
    let account = state.current_account.clone();
    drop(state);

    rsx! {
        div { class: "connect-bar",
            match (provider_available, account) {
                (false, _) => rsx! {
                    p { class: "connect-hint",
                        "No wallet extension detected. Install MetaMask to get started."
                    }
                },
                (true, Some(account)) => rsx! {
                    span { class: "account-chip", title: "{account}",
                        "{short_address(&account)}"
                    }
                },
                (true, None) => rsx! {
                    button {
                        class: "connect-btn",
                        onclick: move |_| node.send(WalletAction::Connect),
                        "Connect Wallet"
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::short_address;

    #[test]
    fn short_address_keeps_both_ends() {
        let addr = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
        assert_eq!(short_address(addr), "0xd8dA…6045");
    }

    #[test]
    fn short_address_passes_short_strings_through() {
        assert_eq!(short_address("0x1234"), "0x1234");
    }
}
