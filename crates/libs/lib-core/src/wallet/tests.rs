//! # Connection Lifecycle Tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::*;
use crate::chain::ChainId;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::notification::{Notification, Notifier};
use crate::storage::MemoryStore;

const ACCOUNT: &str = "0x1234567890123456789012345678901234567890";
const OTHER_ACCOUNT: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

#[derive(Default)]
struct Calls {
    activate: Cell<u32>,
    deactivate: Cell<u32>,
}

struct MockConnector {
    id: ConnectorId,
    outcome: RefCell<Option<Result<Activation>>>,
    pending: RefCell<Option<oneshot::Receiver<Result<Activation>>>>,
    identity: Option<Activation>,
    authorized: bool,
    balance: Option<u128>,
    calls: Rc<Calls>,
}

impl MockConnector {
    fn new(id: ConnectorId, outcome: Result<Activation>) -> Self {
        Self {
            id,
            identity: outcome.as_ref().ok().cloned(),
            outcome: RefCell::new(Some(outcome)),
            pending: RefCell::new(None),
            authorized: true,
            balance: None,
            calls: Rc::new(Calls::default()),
        }
    }

    fn accepting(id: ConnectorId, chain: ChainId) -> Self {
        Self::new(
            id,
            Ok(Activation {
                account: ACCOUNT.to_string(),
                chain_id: chain,
            }),
        )
    }

    fn rejecting(id: ConnectorId, error: Error) -> Self {
        Self::new(id, Err(error))
    }

    fn pending(id: ConnectorId, rx: oneshot::Receiver<Result<Activation>>) -> Self {
        let connector = Self::accepting(id, ChainId::MAINNET);
        *connector.outcome.borrow_mut() = None;
        *connector.pending.borrow_mut() = Some(rx);
        connector
    }

    fn unauthorized(mut self) -> Self {
        self.authorized = false;
        self
    }

    fn with_balance(mut self, wei: u128) -> Self {
        self.balance = Some(wei);
        self
    }
}

#[async_trait(?Send)]
impl Connector for MockConnector {
    fn id(&self) -> ConnectorId {
        self.id
    }

    async fn activate(&self) -> Result<Activation> {
        self.calls.activate.set(self.calls.activate.get() + 1);
        let pending = self.pending.borrow_mut().take();
        if let Some(rx) = pending {
            return rx
                .await
                .unwrap_or_else(|_| Err(Error::Provider("activation dropped".to_string())));
        }
        self.outcome
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(Error::Provider("already activated".to_string())))
    }

    async fn is_authorized(&self) -> bool {
        self.authorized
    }

    async fn deactivate(&self) {
        self.calls.deactivate.set(self.calls.deactivate.get() + 1);
    }

    async fn account(&self) -> Result<Option<String>> {
        Ok(self.identity.as_ref().map(|a| a.account.clone()))
    }

    async fn chain_id(&self) -> Result<Option<ChainId>> {
        Ok(self.identity.as_ref().map(|a| a.chain_id))
    }

    async fn balance(&self, _account: &str) -> Result<Option<u128>> {
        Ok(self.balance)
    }
}

#[derive(Default)]
struct RecordingNotifier {
    seen: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    fn count(&self) -> usize {
        self.seen.borrow().len()
    }

    fn titles(&self) -> Vec<String> {
        self.seen.borrow().iter().map(|n| n.title.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}

type TestManager = ConnectionManager<MockConnector, Rc<MemoryStore>, Rc<RecordingNotifier>>;

struct Harness {
    manager: TestManager,
    store: Rc<MemoryStore>,
    notifier: Rc<RecordingNotifier>,
}

fn harness() -> Harness {
    harness_with_store(MemoryStore::new())
}

fn harness_with_store(store: MemoryStore) -> Harness {
    let store = Rc::new(store);
    let notifier = Rc::new(RecordingNotifier::default());
    let manager = ConnectionManager::new(Config::default(), Rc::clone(&store), Rc::clone(&notifier));
    Harness {
        manager,
        store,
        notifier,
    }
}

// ========== Connect ==========

#[tokio::test]
async fn test_connect_success_persists_selection() {
    let h = harness();

    h.manager
        .connect(MockConnector::accepting(ConnectorId::MetaMask, ChainId::MAINNET))
        .await
        .unwrap();

    assert_eq!(
        h.manager.state(),
        ConnectionState::Connected {
            connector: ConnectorId::MetaMask,
            account: ACCOUNT.to_string(),
            chain_id: ChainId::MAINNET,
        }
    );
    assert_eq!(h.store.peek().as_deref(), Some("MetaMask"));
    assert_eq!(h.notifier.count(), 0);
}

#[tokio::test]
async fn test_connect_while_connected_is_noop() {
    let h = harness();
    h.manager
        .connect(MockConnector::accepting(ConnectorId::MetaMask, ChainId::MAINNET))
        .await
        .unwrap();
    let before = h.manager.state();

    let second = MockConnector::rejecting(ConnectorId::WalletConnect, Error::UserRejected);
    let calls = Rc::clone(&second.calls);
    h.manager.connect(second).await.unwrap();

    assert_eq!(h.manager.state(), before);
    assert_eq!(calls.activate.get(), 0);
    assert_eq!(h.store.peek().as_deref(), Some("MetaMask"));
    assert_eq!(h.notifier.count(), 0);
}

#[tokio::test]
async fn test_connect_while_connecting_is_noop() {
    let h = harness();
    let (tx, rx) = oneshot::channel();

    let manager = h.manager.clone();
    let first = manager.connect(MockConnector::pending(ConnectorId::MetaMask, rx));
    let second_attempt = async {
        tokio::task::yield_now().await;
        assert!(h.manager.state().is_connecting());

        let second = MockConnector::accepting(ConnectorId::WalletConnect, ChainId::MAINNET);
        let calls = Rc::clone(&second.calls);
        h.manager.connect(second).await.unwrap();
        assert_eq!(calls.activate.get(), 0);
        assert_eq!(
            h.manager.state(),
            ConnectionState::Connecting {
                connector: ConnectorId::MetaMask
            }
        );

        tx.send(Ok(Activation {
            account: ACCOUNT.to_string(),
            chain_id: ChainId::MAINNET,
        }))
        .unwrap();
    };

    let (result, _) = tokio::join!(first, second_attempt);
    result.unwrap();
    assert_eq!(h.manager.state().connector(), Some(ConnectorId::MetaMask));
    assert!(h.manager.state().is_connected());
}

#[tokio::test]
async fn test_rejected_activation_yields_error() {
    let h = harness();

    let result = h
        .manager
        .connect(MockConnector::rejecting(ConnectorId::MetaMask, Error::UserRejected))
        .await;

    assert_eq!(result, Err(Error::UserRejected));
    assert_eq!(
        h.manager.state(),
        ConnectionState::Error {
            connector: ConnectorId::MetaMask,
            error: Error::UserRejected,
        }
    );
    assert_eq!(h.notifier.titles(), vec!["Request Rejected".to_string()]);
    assert_eq!(h.store.peek(), None);
}

#[tokio::test]
async fn test_unsupported_chain_activation_yields_error() {
    let h = harness();

    let result = h
        .manager
        .connect(MockConnector::accepting(ConnectorId::WalletConnect, ChainId::new(137)))
        .await;

    assert_eq!(result, Err(Error::UnsupportedChain(ChainId::new(137))));
    assert!(h.manager.state().is_error());
    assert_eq!(h.notifier.titles(), vec!["Chain Error".to_string()]);
    assert_eq!(h.store.peek(), None);
}

#[tokio::test]
async fn test_error_allows_new_attempt() {
    let h = harness();
    let _ = h
        .manager
        .connect(MockConnector::rejecting(ConnectorId::MetaMask, Error::UserRejected))
        .await;
    assert!(h.manager.state().is_error());

    h.manager
        .connect(MockConnector::accepting(ConnectorId::WalletConnect, ChainId::ROPSTEN))
        .await
        .unwrap();

    assert!(h.manager.state().is_connected());
    assert_eq!(h.store.peek().as_deref(), Some("WalletConnect"));
    assert_eq!(h.notifier.count(), 1);
}

#[tokio::test]
async fn test_connect_closes_modal() {
    let h = harness();
    h.manager.open_wallet_modal();
    assert!(h.manager.session().wallet_modal_open);

    h.manager
        .connect(MockConnector::accepting(ConnectorId::MetaMask, ChainId::MAINNET))
        .await
        .unwrap();

    assert!(!h.manager.session().wallet_modal_open);
}

#[tokio::test]
async fn test_abandoned_activation_is_discarded() {
    let h = harness();
    let (tx, rx) = oneshot::channel();
    let connector = MockConnector::pending(ConnectorId::MetaMask, rx);
    let calls = Rc::clone(&connector.calls);

    let manager = h.manager.clone();
    let attempt = manager.connect(connector);
    let logout = async {
        tokio::task::yield_now().await;
        h.manager.disconnect().await;
        tx.send(Ok(Activation {
            account: ACCOUNT.to_string(),
            chain_id: ChainId::MAINNET,
        }))
        .unwrap();
    };

    let (result, _) = tokio::join!(attempt, logout);
    result.unwrap();

    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    assert_eq!(h.store.peek(), None);
    assert_eq!(calls.deactivate.get(), 1);
}

// ========== Disconnect ==========

#[tokio::test]
async fn test_disconnect_clears_selection() {
    let h = harness();
    let connector = MockConnector::accepting(ConnectorId::MetaMask, ChainId::MAINNET);
    let calls = Rc::clone(&connector.calls);
    h.manager.connect(connector).await.unwrap();
    h.manager.open_wallet_modal();

    h.manager.disconnect().await;

    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    assert!(!h.manager.session().wallet_modal_open);
    assert_eq!(h.store.peek(), None);
    assert_eq!(calls.deactivate.get(), 1);

    h.manager.disconnect().await;
    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    assert_eq!(calls.deactivate.get(), 1);
}

#[tokio::test]
async fn test_disconnect_from_error_clears_stale_selection() {
    let h = harness_with_store(MemoryStore::with_value("WalletConnect"));
    let _ = h
        .manager
        .connect(MockConnector::rejecting(ConnectorId::MetaMask, Error::UserRejected))
        .await;

    h.manager.disconnect().await;

    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    assert_eq!(h.store.peek(), None);
}

// ========== Connect click ==========

#[tokio::test]
async fn test_connect_click_on_unsupported_chain_notifies_once_per_click() {
    let h = harness();
    h.manager
        .connect(MockConnector::accepting(ConnectorId::MetaMask, ChainId::MAINNET))
        .await
        .unwrap();
    h.manager.handle_chain_changed(ConnectorId::MetaMask, ChainId::new(137));
    assert!(h.manager.state().is_connected());

    h.manager.on_connect_click();
    assert_eq!(h.notifier.count(), 1);
    assert!(h.manager.session().wallet_modal_open);

    h.manager.close_wallet_modal();
    h.manager.on_connect_click();
    assert_eq!(h.notifier.count(), 2);
    assert!(h.manager.session().wallet_modal_open);
    assert_eq!(h.notifier.titles(), vec!["Chain Error".to_string(), "Chain Error".to_string()]);
}

#[tokio::test]
async fn test_connect_click_on_supported_chain_is_silent() {
    let h = harness();
    h.manager.on_connect_click();
    assert!(h.manager.session().wallet_modal_open);

    h.manager
        .connect(MockConnector::accepting(ConnectorId::MetaMask, ChainId::ROPSTEN))
        .await
        .unwrap();
    h.manager.on_connect_click();

    assert_eq!(h.notifier.count(), 0);
    assert!(h.manager.session().wallet_modal_open);
}

// ========== Restore ==========

#[tokio::test]
async fn test_restore_reconnects_authorized_wallet() {
    let h = harness_with_store(MemoryStore::with_value("MetaMask"));
    assert!(!h.manager.eager_attempted());

    h.manager
        .restore(|id| Some(MockConnector::accepting(id, ChainId::MAINNET)))
        .await;

    assert!(h.manager.eager_attempted());
    assert_eq!(h.manager.state().connector(), Some(ConnectorId::MetaMask));
    assert!(h.manager.state().is_connected());
    assert_eq!(h.notifier.count(), 0);
}

#[tokio::test]
async fn test_restore_skips_unauthorized_wallet() {
    let h = harness_with_store(MemoryStore::with_value("WalletConnect"));

    h.manager
        .restore(|id| Some(MockConnector::accepting(id, ChainId::MAINNET).unauthorized()))
        .await;

    assert!(h.manager.eager_attempted());
    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    assert_eq!(h.store.peek().as_deref(), Some("WalletConnect"));
}

#[tokio::test]
async fn test_restore_failure_is_silent() {
    let h = harness_with_store(MemoryStore::with_value("MetaMask"));

    h.manager
        .restore(|id| Some(MockConnector::rejecting(id, Error::UserRejected)))
        .await;

    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    assert_eq!(h.notifier.count(), 0);
    assert_eq!(h.store.peek().as_deref(), Some("MetaMask"));
}

#[tokio::test]
async fn test_restore_on_unsupported_chain_is_silent() {
    let h = harness_with_store(MemoryStore::with_value("WalletConnect"));

    h.manager
        .restore(|id| Some(MockConnector::accepting(id, ChainId::new(137))))
        .await;

    assert!(h.manager.eager_attempted());
    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    assert_eq!(h.notifier.count(), 0);
    assert_eq!(h.store.peek().as_deref(), Some("WalletConnect"));
}

#[tokio::test]
async fn test_restore_discards_unknown_selection() {
    let h = harness_with_store(MemoryStore::with_value("Portis"));
    let selected = Cell::new(false);

    h.manager
        .restore(|id| {
            selected.set(true);
            Some(MockConnector::accepting(id, ChainId::MAINNET))
        })
        .await;

    assert!(!selected.get());
    assert_eq!(h.store.peek(), None);
    assert!(h.manager.eager_attempted());
}

#[tokio::test]
async fn test_restore_runs_once() {
    let h = harness_with_store(MemoryStore::with_value("MetaMask"));
    h.manager.restore(|_| None).await;
    assert!(h.manager.eager_attempted());

    h.manager
        .restore(|id| Some(MockConnector::accepting(id, ChainId::MAINNET)))
        .await;

    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
}

// ========== Provider events ==========

#[tokio::test]
async fn test_accounts_changed() {
    let h = harness();
    h.manager
        .connect(MockConnector::accepting(ConnectorId::MetaMask, ChainId::MAINNET))
        .await
        .unwrap();

    h.manager
        .handle_accounts_changed(ConnectorId::MetaMask, &[OTHER_ACCOUNT.to_string()]);
    assert_eq!(h.manager.state().account(), Some(OTHER_ACCOUNT));

    h.manager.handle_accounts_changed(ConnectorId::MetaMask, &[]);
    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    assert_eq!(h.store.peek(), None);
}

#[tokio::test]
async fn test_events_ignored_while_disconnected() {
    let h = harness();
    h.manager
        .handle_accounts_changed(ConnectorId::MetaMask, &[OTHER_ACCOUNT.to_string()]);
    h.manager.handle_chain_changed(ConnectorId::MetaMask, ChainId::new(137));
    h.manager.handle_provider_disconnect(ConnectorId::WalletConnect);
    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_provider_disconnect_skips_deactivate() {
    let h = harness();
    let connector = MockConnector::accepting(ConnectorId::WalletConnect, ChainId::MAINNET);
    let calls = Rc::clone(&connector.calls);
    h.manager.connect(connector).await.unwrap();

    h.manager.handle_provider_disconnect(ConnectorId::WalletConnect);

    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    assert_eq!(h.store.peek(), None);
    assert_eq!(calls.deactivate.get(), 0);
}

#[tokio::test]
async fn test_events_from_inactive_wallet_are_ignored() {
    let h = harness();
    h.manager
        .connect(MockConnector::accepting(ConnectorId::WalletConnect, ChainId::MAINNET))
        .await
        .unwrap();
    let before = h.manager.state();

    h.manager.handle_accounts_changed(ConnectorId::MetaMask, &[]);
    h.manager
        .handle_accounts_changed(ConnectorId::MetaMask, &[OTHER_ACCOUNT.to_string()]);
    h.manager.handle_chain_changed(ConnectorId::MetaMask, ChainId::new(137));
    h.manager.handle_provider_disconnect(ConnectorId::MetaMask);

    assert_eq!(h.manager.state(), before);
    assert_eq!(h.store.peek().as_deref(), Some("WalletConnect"));
}

#[tokio::test]
async fn test_refresh_identity_reads_connector() {
    let h = harness();
    h.manager
        .connect(MockConnector::accepting(ConnectorId::MetaMask, ChainId::ROPSTEN))
        .await
        .unwrap();
    h.manager
        .handle_accounts_changed(ConnectorId::MetaMask, &[OTHER_ACCOUNT.to_string()]);
    h.manager.handle_chain_changed(ConnectorId::MetaMask, ChainId::MAINNET);

    h.manager.refresh_identity().await;

    assert_eq!(h.manager.state().account(), Some(ACCOUNT));
    assert_eq!(h.manager.state().chain_id(), Some(ChainId::ROPSTEN));
}

// ========== Balance and observers ==========

#[tokio::test]
async fn test_refresh_balance() {
    let h = harness();
    assert_eq!(h.manager.refresh_balance().await, 0);

    h.manager
        .connect(MockConnector::accepting(ConnectorId::MetaMask, ChainId::MAINNET).with_balance(42))
        .await
        .unwrap();
    assert_eq!(h.manager.refresh_balance().await, 42);
}

#[tokio::test]
async fn test_missing_balance_is_zero() {
    let h = harness();
    h.manager
        .connect(MockConnector::accepting(ConnectorId::MetaMask, ChainId::MAINNET))
        .await
        .unwrap();
    assert_eq!(h.manager.refresh_balance().await, 0);
}

#[tokio::test]
async fn test_observers_see_every_transition() {
    let h = harness();
    let seen: Rc<RefCell<Vec<ConnectionState>>> = Rc::default();
    let sink = Rc::clone(&seen);
    h.manager
        .subscribe(move |session| sink.borrow_mut().push(session.connection.clone()));

    h.manager
        .connect(MockConnector::accepting(ConnectorId::MetaMask, ChainId::MAINNET))
        .await
        .unwrap();
    h.manager.disconnect().await;

    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert!(seen[0].is_connecting());
    assert!(seen[1].is_connected());
    assert_eq!(seen[2], ConnectionState::Disconnected);
}
