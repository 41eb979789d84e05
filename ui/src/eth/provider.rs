use alloy::primitives::Address;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use beam_common::chain::{TransferRequest, WalletError, WalletProvider};

/// Handle to the wallet extension's injected EIP-1193 object
/// (`window.ethereum`).
#[derive(Clone)]
pub struct Eip1193Provider {
    inner: JsValue,
}

/// Parameter object for `eth_sendTransaction` value transfers.
#[derive(Serialize)]
struct EthTransaction {
    from: String,
    to: String,
    gas: String,
    value: String,
}

impl Eip1193Provider {
    /// Look for an injected provider on the window object.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self { inner: ethereum })
    }

    /// Issue a JSON-RPC request through the provider.
    pub async fn request(&self, method: &str, params: JsValue) -> Result<JsValue, WalletError> {
        let args = js_sys::Object::new();
        js_sys::Reflect::set(&args, &"method".into(), &JsValue::from_str(method))
            .map_err(|e| rpc_error(method, &e))?;
        if !params.is_undefined() {
            js_sys::Reflect::set(&args, &"params".into(), &params)
                .map_err(|e| rpc_error(method, &e))?;
        }
        let request_fn = js_sys::Reflect::get(&self.inner, &"request".into())
            .map_err(|e| rpc_error(method, &e))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| WalletError::Provider("provider has no request method".into()))?;
        let promise: js_sys::Promise = request_fn
            .call1(&self.inner, &args)
            .map_err(|e| rpc_error(method, &e))?
            .dyn_into()
            .map_err(|_| WalletError::Provider(format!("{method} did not return a promise")))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| rpc_error(method, &e))
    }

    async fn account_list(&self, method: &str) -> Result<Vec<Address>, WalletError> {
        let result = self.request(method, JsValue::UNDEFINED).await?;
        let array = js_sys::Array::from(&result);
        let mut accounts = Vec::with_capacity(array.length() as usize);
        for value in array.iter() {
            let Some(text) = value.as_string() else {
                continue;
            };
            match text.parse::<Address>() {
                Ok(address) => accounts.push(address),
                Err(_) => tracing::warn!("ignoring malformed account: {text}"),
            }
        }
        Ok(accounts)
    }
}

fn rpc_error(method: &str, value: &JsValue) -> WalletError {
    WalletError::Provider(format!("{method} failed: {value:?}"))
}

impl WalletProvider for Eip1193Provider {
    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.account_list("eth_accounts").await
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.account_list("eth_requestAccounts").await
    }

    async fn send_transfer(&self, request: &TransferRequest) -> Result<String, WalletError> {
        let tx = EthTransaction {
            from: request.from.to_string(),
            to: request.to.to_string(),
            gas: format!("{:#x}", request.gas),
            value: format!("{:#x}", request.value),
        };
        let tx = serde_wasm_bindgen::to_value(&tx)
            .map_err(|e| WalletError::Provider(format!("encode transaction: {e}")))?;
        let params = js_sys::Array::of1(&tx);
        let result = self.request("eth_sendTransaction", params.into()).await?;
        result
            .as_string()
            .ok_or_else(|| WalletError::Provider("eth_sendTransaction returned no hash".into()))
    }
}
