use dioxus::prelude::*;

use super::connect_bar::ConnectBar;
use super::transactions_view::TransactionsView;
use super::transfer_form::TransferFormView;
use super::wallet_api::use_wallet_coroutine;
use super::wallet_state::WalletUi;

const STYLE: &str = include_str!("../../assets/style.css");

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(WalletUi::new()));
    use_wallet_coroutine();

    rsx! {
        document::Style { {STYLE} }
        div { class: "beam-app",
            header { class: "app-header",
                div { class: "header-top",
                    h1 { "BEAM" }
                    ConnectBar {}
                }
                p { class: "tagline", "Send crypto with a message attached" }
            }
            main {
                TransferFormView {}
                TransactionsView {}
            }
        }
    }
}
