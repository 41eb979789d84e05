//! Browser-side chain bindings: the injected EIP-1193 provider, the
//! ledger contract, and localStorage persistence. WASM only.

pub mod contract;
pub mod provider;
pub mod storage;
