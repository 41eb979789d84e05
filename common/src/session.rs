//! Orchestration engine behind the wallet UI.
//!
//! Owns the chain-derived session state and performs every wallet and
//! contract operation against injected capabilities, so the full flow
//! can be exercised natively with test doubles. The UI layer mirrors
//! [`SessionState`] into its reactive signal after each operation, and
//! mid-operation for the loading window around confirmation.

use alloy::primitives::Address;

use crate::chain::{
    ChainAccess, CountStore, LedgerAppend, PendingEntry, TransactionLedger, TransferRequest,
    WalletError, WalletProvider, TRANSFER_GAS,
};
use crate::form::TransferForm;
use crate::ledger::TransactionRecord;
use crate::units::parse_amount;

/// UI-observable session state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub current_account: Option<Address>,
    /// True while a ledger append is awaiting confirmation.
    pub is_loading: bool,
    /// Last known ledger entry count.
    pub transaction_count: Option<u64>,
    /// Display records, in ledger order.
    pub transactions: Vec<TransactionRecord>,
}

/// Stateful facade over the wallet provider, the ledger contract, and
/// the durable transaction counter.
pub struct WalletSession<W, L, S> {
    chain: Option<ChainAccess<W, L>>,
    store: S,
    state: SessionState,
}

impl<W, L, S> WalletSession<W, L, S>
where
    W: WalletProvider,
    L: TransactionLedger,
    S: CountStore,
{
    /// Build a session. `chain` is `None` when no wallet extension was
    /// detected; every chain-touching operation then fails with
    /// [`WalletError::ProviderMissing`] without mutating state.
    ///
    /// The persisted transaction count is adopted immediately so the UI
    /// shows a sensible number before the first chain round-trip.
    pub fn new(chain: Option<ChainAccess<W, L>>, store: S) -> Self {
        let transaction_count = store.load();
        Self {
            chain,
            store,
            state: SessionState {
                transaction_count,
                ..SessionState::default()
            },
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn has_provider(&self) -> bool {
        self.chain.is_some()
    }

    /// Startup hydration: adopt any already-authorized account, load the
    /// transaction history once, and sync the persisted entry count.
    /// Also re-run after a successful [`Self::connect_wallet`].
    pub async fn hydrate(&mut self) -> Result<(), WalletError> {
        let chain = self.chain.as_ref().ok_or(WalletError::ProviderMissing)?;
        let accounts = chain.wallet.accounts().await?;
        match accounts.first() {
            Some(first) => {
                self.state.current_account = Some(*first);
                if let Err(err) = self.refresh_transactions().await {
                    // History stays at its previous value; the account
                    // itself is still usable.
                    tracing::error!("transaction refresh failed: {err}");
                }
            }
            None => tracing::debug!("no authorized accounts"),
        }
        self.sync_count().await
    }

    /// Prompt the wallet for authorization, adopt the first granted
    /// account, and re-run startup hydration with it.
    pub async fn connect_wallet(&mut self) -> Result<Address, WalletError> {
        let chain = self.chain.as_ref().ok_or(WalletError::ProviderMissing)?;
        let accounts = chain.wallet.request_accounts().await.map_err(|err| {
            tracing::error!("wallet authorization failed: {err}");
            err
        })?;
        let first = *accounts
            .first()
            .ok_or_else(|| WalletError::Provider("authorization returned no accounts".into()))?;
        self.state.current_account = Some(first);
        self.hydrate().await?;
        Ok(first)
    }

    /// Replace the transaction list with the ledger's current contents.
    ///
    /// On failure the list keeps its previous value; callers decide
    /// whether to surface or swallow the error.
    pub async fn refresh_transactions(&mut self) -> Result<usize, WalletError> {
        let chain = self.chain.as_ref().ok_or(WalletError::ProviderMissing)?;
        let raw = chain.ledger.entries().await?;
        let records: Vec<TransactionRecord> = raw.iter().map(TransactionRecord::from_raw).collect();
        let fetched = records.len();
        self.state.transactions = records;
        Ok(fetched)
    }

    /// Read the ledger's entry count, mirror it into state, and persist
    /// it to the durable store.
    pub async fn sync_count(&mut self) -> Result<(), WalletError> {
        let chain = self.chain.as_ref().ok_or(WalletError::ProviderMissing)?;
        let count = chain.ledger.entry_count().await?;
        self.state.transaction_count = Some(count);
        self.store.save(count)
    }

    /// Submit the form: native value transfer through the wallet, then a
    /// ledger append, then wait for confirmation and refresh the count.
    ///
    /// `on_change` is invoked after every state mutation so a reactive
    /// UI can observe the loading window while the confirmation is
    /// pending. The loading flag is released on every exit path,
    /// including confirmation failure.
    pub async fn send_transaction(
        &mut self,
        form: &TransferForm,
        mut on_change: impl FnMut(&SessionState),
    ) -> Result<String, WalletError> {
        let Some(chain) = self.chain.as_ref() else {
            return Err(WalletError::ProviderMissing);
        };
        let from = self.state.current_account.ok_or(WalletError::NotConnected)?;
        let to: Address = form
            .address_to
            .trim()
            .parse()
            .map_err(|_| WalletError::InvalidRecipient(form.address_to.clone()))?;
        let value = parse_amount(&form.amount)?;

        chain
            .wallet
            .send_transfer(&TransferRequest {
                from,
                to,
                value,
                gas: TRANSFER_GAS,
            })
            .await?;

        let pending = chain
            .ledger
            .append(&LedgerAppend {
                from,
                to,
                amount: value,
                message: form.message.clone(),
                keyword: form.keyword.clone(),
            })
            .await?;
        let tx_hash = pending.tx_hash().to_string();
        tracing::debug!("ledger append pending: {tx_hash}");

        self.state.is_loading = true;
        on_change(&self.state);
        let confirmation = pending.confirmed().await;
        self.state.is_loading = false;
        on_change(&self.state);
        confirmation.map_err(|err| {
            tracing::error!("confirmation failed for {tx_hash}: {err}");
            err
        })?;

        let count = chain.ledger.entry_count().await?;
        self.state.transaction_count = Some(count);
        self.store.save(count)?;
        on_change(&self.state);
        Ok(tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;
    use crate::ledger::RawLedgerEntry;
    use alloy::primitives::{address, U256};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const ALICE: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
    const BOB: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
    const ONE_COIN: u64 = 1_000_000_000_000_000_000;

    #[derive(Clone, Default)]
    struct MockWallet {
        authorized: Vec<Address>,
        /// `None` means the user rejected the authorization prompt.
        prompt_result: Option<Vec<Address>>,
        transfers: Rc<RefCell<Vec<TransferRequest>>>,
    }

    impl WalletProvider for MockWallet {
        async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
            Ok(self.authorized.clone())
        }

        async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
            self.prompt_result
                .clone()
                .ok_or_else(|| WalletError::Provider("user rejected".into()))
        }

        async fn send_transfer(&self, request: &TransferRequest) -> Result<String, WalletError> {
            self.transfers.borrow_mut().push(request.clone());
            Ok("0xf00d".into())
        }
    }

    struct MockPending {
        hash: String,
        fail: bool,
    }

    impl PendingEntry for MockPending {
        fn tx_hash(&self) -> &str {
            &self.hash
        }

        async fn confirmed(self) -> Result<(), WalletError> {
            if self.fail {
                Err(WalletError::Contract("reverted".into()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Clone, Default)]
    struct MockLedger {
        seeded: Vec<RawLedgerEntry>,
        fail_reads: Rc<Cell<bool>>,
        confirm_fails: bool,
        appended: Rc<RefCell<Vec<LedgerAppend>>>,
        reads: Rc<Cell<u32>>,
    }

    impl TransactionLedger for MockLedger {
        type Pending = MockPending;

        async fn entries(&self) -> Result<Vec<RawLedgerEntry>, WalletError> {
            self.reads.set(self.reads.get() + 1);
            if self.fail_reads.get() {
                return Err(WalletError::Contract("call reverted".into()));
            }
            Ok(self.seeded.clone())
        }

        async fn append(&self, entry: &LedgerAppend) -> Result<MockPending, WalletError> {
            self.appended.borrow_mut().push(entry.clone());
            Ok(MockPending {
                hash: "0xabc123".into(),
                fail: self.confirm_fails,
            })
        }

        async fn entry_count(&self) -> Result<u64, WalletError> {
            Ok(self.seeded.len() as u64 + self.appended.borrow().len() as u64)
        }
    }

    #[derive(Clone, Default)]
    struct MockStore {
        saved: Rc<Cell<Option<u64>>>,
    }

    impl CountStore for MockStore {
        fn load(&self) -> Option<u64> {
            self.saved.get()
        }

        fn save(&mut self, count: u64) -> Result<(), WalletError> {
            self.saved.set(Some(count));
            Ok(())
        }
    }

    fn entry(timestamp: u64) -> RawLedgerEntry {
        RawLedgerEntry {
            sender: ALICE,
            receiver: BOB,
            timestamp,
            message: "gm".into(),
            keyword: "rocket".into(),
            amount: U256::from(ONE_COIN),
        }
    }

    fn session(
        wallet: MockWallet,
        ledger: MockLedger,
        store: MockStore,
    ) -> WalletSession<MockWallet, MockLedger, MockStore> {
        WalletSession::new(Some(ChainAccess { wallet, ledger }), store)
    }

    fn detached(store: MockStore) -> WalletSession<MockWallet, MockLedger, MockStore> {
        WalletSession::new(None, store)
    }

    fn filled_form() -> TransferForm {
        TransferForm {
            address_to: BOB.to_string(),
            amount: "1".into(),
            keyword: "rocket".into(),
            message: "gm".into(),
        }
    }

    #[tokio::test]
    async fn hydrate_adopts_first_account_and_loads_history() {
        let wallet = MockWallet {
            authorized: vec![ALICE, BOB],
            ..MockWallet::default()
        };
        let ledger = MockLedger {
            seeded: vec![entry(1_630_000_000), entry(1_630_000_060)],
            ..MockLedger::default()
        };
        let reads = ledger.reads.clone();
        let store = MockStore::default();
        let saved = store.saved.clone();

        let mut session = session(wallet, ledger, store);
        session.hydrate().await.unwrap();

        assert_eq!(session.state().current_account, Some(ALICE));
        assert_eq!(session.state().transactions.len(), 2);
        assert_eq!(reads.get(), 1, "history fetched exactly once");
        assert_eq!(session.state().transaction_count, Some(2));
        assert_eq!(saved.get(), Some(2), "count persisted");
    }

    #[tokio::test]
    async fn hydrate_without_provider_mutates_nothing() {
        let mut session = detached(MockStore::default());
        let before = session.state().clone();

        let err = session.hydrate().await.unwrap_err();

        assert_eq!(err, WalletError::ProviderMissing);
        assert_eq!(session.state(), &before);
    }

    #[tokio::test]
    async fn connect_and_refresh_without_provider_mutate_nothing() {
        let mut session = detached(MockStore::default());
        let before = session.state().clone();

        assert_eq!(
            session.connect_wallet().await.unwrap_err(),
            WalletError::ProviderMissing
        );
        assert_eq!(
            session.refresh_transactions().await.unwrap_err(),
            WalletError::ProviderMissing
        );
        assert_eq!(session.state(), &before);
    }

    #[tokio::test]
    async fn hydrate_without_accounts_still_syncs_count() {
        let ledger = MockLedger {
            seeded: vec![entry(1_630_000_000)],
            ..MockLedger::default()
        };
        let reads = ledger.reads.clone();

        let mut session = session(MockWallet::default(), ledger, MockStore::default());
        session.hydrate().await.unwrap();

        assert_eq!(session.state().current_account, None);
        assert_eq!(reads.get(), 0, "no history fetch without an account");
        assert_eq!(session.state().transaction_count, Some(1));
    }

    #[tokio::test]
    async fn connect_wallet_adopts_prompted_account_and_rehydrates() {
        let wallet = MockWallet {
            authorized: vec![BOB],
            prompt_result: Some(vec![BOB]),
            ..MockWallet::default()
        };
        let ledger = MockLedger {
            seeded: vec![entry(1_630_000_000)],
            ..MockLedger::default()
        };
        let reads = ledger.reads.clone();

        let mut session = session(wallet, ledger, MockStore::default());
        let connected = session.connect_wallet().await.unwrap();

        assert_eq!(connected, BOB);
        assert_eq!(session.state().current_account, Some(BOB));
        assert_eq!(reads.get(), 1, "hydration ran after connect");
    }

    #[tokio::test]
    async fn connect_wallet_rejection_propagates() {
        let wallet = MockWallet {
            prompt_result: None,
            ..MockWallet::default()
        };

        let mut session = session(wallet, MockLedger::default(), MockStore::default());
        let err = session.connect_wallet().await.unwrap_err();

        assert!(matches!(err, WalletError::Provider(_)));
        assert_eq!(session.state().current_account, None);
    }

    #[tokio::test]
    async fn refresh_failure_keeps_stale_list() {
        let wallet = MockWallet {
            authorized: vec![ALICE],
            ..MockWallet::default()
        };
        let ledger = MockLedger {
            seeded: vec![entry(1_630_000_000)],
            ..MockLedger::default()
        };
        let fail_reads = ledger.fail_reads.clone();

        let mut session = session(wallet, ledger, MockStore::default());
        session.hydrate().await.unwrap();
        assert_eq!(session.state().transactions.len(), 1);

        fail_reads.set(true);
        let err = session.refresh_transactions().await.unwrap_err();

        assert!(matches!(err, WalletError::Contract(_)));
        assert_eq!(
            session.state().transactions.len(),
            1,
            "stale list survives a failed refresh"
        );
    }

    #[tokio::test]
    async fn refresh_is_idempotent_over_unchanged_ledger() {
        let ledger = MockLedger {
            seeded: vec![entry(1_630_000_000), entry(1_630_000_060)],
            ..MockLedger::default()
        };

        let mut session = session(MockWallet::default(), ledger, MockStore::default());
        session.refresh_transactions().await.unwrap();
        let first = session.state().transactions.clone();
        session.refresh_transactions().await.unwrap();

        assert_eq!(first, session.state().transactions);
    }

    #[tokio::test]
    async fn send_transaction_happy_path() {
        let wallet = MockWallet {
            authorized: vec![ALICE],
            ..MockWallet::default()
        };
        let transfers = wallet.transfers.clone();
        let ledger = MockLedger::default();
        let appended = ledger.appended.clone();
        let store = MockStore::default();
        let saved = store.saved.clone();

        let mut session = session(wallet, ledger, store);
        session.hydrate().await.unwrap();

        let mut loading_seen = Vec::new();
        let tx_hash = session
            .send_transaction(&filled_form(), |state| loading_seen.push(state.is_loading))
            .await
            .unwrap();

        assert_eq!(tx_hash, "0xabc123");

        let transfers = transfers.borrow();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].from, ALICE);
        assert_eq!(transfers[0].to, BOB);
        assert_eq!(transfers[0].value, U256::from(ONE_COIN));
        assert_eq!(transfers[0].gas, TRANSFER_GAS);

        let appended = appended.borrow();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].message, "gm");
        assert_eq!(appended[0].keyword, "rocket");

        // Loading window observed, then released; count refreshed after
        // the append landed.
        assert_eq!(loading_seen, vec![true, false, false]);
        assert!(!session.state().is_loading);
        assert_eq!(session.state().transaction_count, Some(1));
        assert_eq!(saved.get(), Some(1));
    }

    #[tokio::test]
    async fn send_rejects_malformed_amount_before_any_chain_call() {
        let wallet = MockWallet {
            authorized: vec![ALICE],
            ..MockWallet::default()
        };
        let transfers = wallet.transfers.clone();
        let ledger = MockLedger::default();
        let appended = ledger.appended.clone();

        let mut session = session(wallet, ledger, MockStore::default());
        session.hydrate().await.unwrap();

        let mut form = filled_form();
        form.set(FormField::Amount, "not-a-number");
        let mut changes = 0;
        let err = session
            .send_transaction(&form, |_| changes += 1)
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::InvalidAmount(_)));
        assert!(transfers.borrow().is_empty());
        assert!(appended.borrow().is_empty());
        assert_eq!(changes, 0);
        assert!(!session.state().is_loading);
    }

    #[tokio::test]
    async fn send_rejects_malformed_recipient() {
        let wallet = MockWallet {
            authorized: vec![ALICE],
            ..MockWallet::default()
        };

        let mut session = session(wallet, MockLedger::default(), MockStore::default());
        session.hydrate().await.unwrap();

        let mut form = filled_form();
        form.set(FormField::AddressTo, "not-an-address");
        let err = session
            .send_transaction(&form, |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::InvalidRecipient(_)));
    }

    #[tokio::test]
    async fn send_without_provider_mutates_nothing() {
        let mut session = detached(MockStore::default());
        let before = session.state().clone();

        let err = session
            .send_transaction(&filled_form(), |_| {})
            .await
            .unwrap_err();

        assert_eq!(err, WalletError::ProviderMissing);
        assert_eq!(session.state(), &before);
    }

    #[tokio::test]
    async fn send_without_account_fails() {
        let wallet = MockWallet::default();
        let transfers = wallet.transfers.clone();

        let mut session = session(wallet, MockLedger::default(), MockStore::default());
        let err = session
            .send_transaction(&filled_form(), |_| {})
            .await
            .unwrap_err();

        assert_eq!(err, WalletError::NotConnected);
        assert!(transfers.borrow().is_empty());
    }

    #[tokio::test]
    async fn failed_confirmation_still_releases_loading_flag() {
        let wallet = MockWallet {
            authorized: vec![ALICE],
            ..MockWallet::default()
        };
        let ledger = MockLedger {
            confirm_fails: true,
            ..MockLedger::default()
        };

        let mut session = session(wallet, ledger, MockStore::default());
        session.hydrate().await.unwrap();
        let count_before = session.state().transaction_count;

        let mut loading_seen = Vec::new();
        let err = session
            .send_transaction(&filled_form(), |state| loading_seen.push(state.is_loading))
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::Contract(_)));
        // The flag is released even though confirmation failed.
        assert_eq!(loading_seen, vec![true, false]);
        assert!(!session.state().is_loading);
        // The count is not refreshed after a failed confirmation.
        assert_eq!(session.state().transaction_count, count_before);
    }

    #[tokio::test]
    async fn persisted_count_adopted_at_construction() {
        let store = MockStore::default();
        store.saved.set(Some(7));

        let session = detached(store);

        assert_eq!(session.state().transaction_count, Some(7));
    }
}
