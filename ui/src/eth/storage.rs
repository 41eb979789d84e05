use beam_common::chain::{CountStore, WalletError};

const COUNT_KEY: &str = "transaction_count";

/// Transaction counter persisted in the browser's localStorage. Shared
/// and unsynchronized across tabs; last writer wins.
#[derive(Clone, Default)]
pub struct BrowserCountStore;

impl BrowserCountStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl CountStore for BrowserCountStore {
    fn load(&self) -> Option<u64> {
        let value = Self::storage()?.get_item(COUNT_KEY).ok()??;
        value.parse().ok()
    }

    fn save(&mut self, count: u64) -> Result<(), WalletError> {
        let storage = Self::storage()
            .ok_or_else(|| WalletError::Storage("localStorage unavailable".into()))?;
        storage
            .set_item(COUNT_KEY, &count.to_string())
            .map_err(|e| WalletError::Storage(format!("persist count: {e:?}")))
    }
}
