//! # Connection Manager
//!
//! Drives [`ConnectionState`] for one page. The manager is a cheap `Rc` handle,
//! so UI callbacks can each hold a clone. Its `RefCell` borrow is never held
//! across an `.await`; the provider's activation future is the only suspension
//! point.
//!
//! ```text
//!                connect()                 Ok(activation)
//! Disconnected ───────────▶ Connecting ───────────────────▶ Connected
//!      ▲  ▲                     │                               │
//!      │  │ connect()           │ Err(error), one notification  │ disconnect() /
//!      │  └──────────────── Error ◀─┘                           │ accounts cleared
//!      └────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::chain::ChainId;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::notification::{Notification, Notifier};
use crate::storage::SelectionStore;
use crate::wallet::{Activation, ConnectionState, Connector, ConnectorId, Session};

type Observer = Rc<dyn Fn(&Session)>;

struct Inner<C> {
    session: Session,
    active: Option<Rc<C>>,
    eager_attempted: bool,
}

struct Shared<C, S, N> {
    inner: RefCell<Inner<C>>,
    observers: RefCell<Vec<Observer>>,
    store: S,
    notifier: N,
    config: Config,
}

pub struct ConnectionManager<C, S, N> {
    shared: Rc<Shared<C, S, N>>,
}

impl<C, S, N> Clone for ConnectionManager<C, S, N> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<C, S, N> ConnectionManager<C, S, N>
where
    C: Connector + 'static,
    S: SelectionStore,
    N: Notifier,
{
    pub fn new(config: Config, store: S, notifier: N) -> Self {
        Self {
            shared: Rc::new(Shared {
                inner: RefCell::new(Inner {
                    session: Session::default(),
                    active: None,
                    eager_attempted: false,
                }),
                observers: RefCell::new(Vec::new()),
                store,
                notifier,
                config,
            }),
        }
    }

    pub fn session(&self) -> Session {
        self.shared.inner.borrow().session.clone()
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.inner.borrow().session.connection.clone()
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    /// Whether the page-load reconnection attempt has finished.
    pub fn eager_attempted(&self) -> bool {
        self.shared.inner.borrow().eager_attempted
    }

    /// Register a callback run with the new session after every transition.
    pub fn subscribe(&self, observer: impl Fn(&Session) + 'static) {
        self.shared.observers.borrow_mut().push(Rc::new(observer));
    }

    pub fn open_wallet_modal(&self) {
        self.update(|inner| inner.session.wallet_modal_open = true);
    }

    pub fn close_wallet_modal(&self) {
        self.update(|inner| inner.session.wallet_modal_open = false);
    }

    /// Connect button handler: warn once if the wallet sits on an unsupported
    /// chain, then always open the wallet modal.
    pub fn on_connect_click(&self) {
        if let Some(chain) = self.state().chain_id() {
            if !self.shared.config.is_supported_chain(chain) {
                warn!(%chain, "connect clicked on unsupported chain");
                self.shared
                    .notifier
                    .notify(Notification::from(&Error::UnsupportedChain(chain)));
            }
        }
        self.open_wallet_modal();
    }

    /// Activate `connector`.
    ///
    /// A no-op while already connected or connecting. On failure the state
    /// moves to `Error`, one notification is pushed, and the error is returned.
    pub async fn connect(&self, connector: C) -> Result<()> {
        let id = connector.id();
        let started = self.update(|inner| {
            if inner.session.connection.is_connected() || inner.session.connection.is_connecting() {
                return false;
            }
            inner.session.connection = ConnectionState::Connecting { connector: id };
            inner.session.wallet_modal_open = false;
            true
        });
        if !started {
            debug!(connector = %id, "connect ignored, already {:?}", self.state());
            return Ok(());
        }

        info!(connector = %id, "activating wallet");
        let result = self.activate_checked(&connector).await;

        match result {
            Ok(activation) => {
                if !self.is_connecting_with(id) {
                    debug!(connector = %id, "activation finished after the attempt was abandoned");
                    connector.deactivate().await;
                    return Ok(());
                }
                self.update(|inner| {
                    inner.active = Some(Rc::new(connector));
                    inner.session.connection = ConnectionState::Connected {
                        connector: id,
                        account: activation.account.clone(),
                        chain_id: activation.chain_id,
                    };
                });
                self.persist(id);
                info!(connector = %id, account = %activation.account, chain = %activation.chain_id, "wallet connected");
                Ok(())
            }
            Err(error) => {
                warn!(connector = %id, %error, "wallet activation failed");
                if self.is_connecting_with(id) {
                    self.update(|inner| {
                        inner.session.connection = ConnectionState::Error {
                            connector: id,
                            error: error.clone(),
                        };
                    });
                    self.shared.notifier.notify(Notification::from(&error));
                }
                Err(error)
            }
        }
    }

    /// Log out: deactivate, forget the persisted selection, return to `Disconnected`.
    pub async fn disconnect(&self) {
        let active = self.reset();
        if let Some(connector) = active {
            connector.deactivate().await;
        }
        info!("wallet disconnected");
    }

    /// The wallet ended the session on its side.
    ///
    /// Provider events carry their `source`; events from a connector other
    /// than the active one are ignored.
    pub fn handle_provider_disconnect(&self, source: ConnectorId) {
        if !self.is_active_source(source) {
            debug!(connector = %source, "ignoring disconnect from inactive wallet");
            return;
        }
        if self.reset().is_some() {
            info!("wallet closed the session");
        }
    }

    pub fn handle_accounts_changed(&self, source: ConnectorId, accounts: &[String]) {
        if !self.is_active_source(source) {
            debug!(connector = %source, "ignoring accountsChanged from inactive wallet");
            return;
        }
        match accounts.first() {
            None => {
                info!("wallet reported no accounts");
                self.reset();
            }
            Some(next) => {
                let next = next.clone();
                self.update(|inner| {
                    if let ConnectionState::Connected { account, .. } = &mut inner.session.connection {
                        *account = next;
                    }
                });
            }
        }
    }

    pub fn handle_chain_changed(&self, source: ConnectorId, chain: ChainId) {
        if !self.is_active_source(source) {
            debug!(connector = %source, "ignoring chainChanged from inactive wallet");
            return;
        }
        if !self.shared.config.is_supported_chain(chain) {
            warn!(%chain, "wallet switched to an unsupported chain");
        }
        self.update(|inner| {
            if let ConnectionState::Connected { chain_id, .. } = &mut inner.session.connection {
                *chain_id = chain;
            }
        });
    }

    /// Page-load reconnection.
    ///
    /// Reads the persisted connector and, if the wallet already authorized
    /// this page, activates it without prompting. Failures fall back to
    /// `Disconnected` quietly.
    pub async fn restore<F>(&self, select: F)
    where
        F: FnOnce(ConnectorId) -> Option<C>,
    {
        if self.eager_attempted() {
            return;
        }

        if let Some(connector) = self.stored_connector().and_then(select) {
            self.restore_with(connector).await;
        }

        self.update(|inner| inner.eager_attempted = true);
    }

    /// Re-read account and chain from the active connector.
    pub async fn refresh_identity(&self) {
        let Some(connector) = self.active() else {
            return;
        };
        let source = connector.id();

        match connector.account().await {
            Ok(Some(account)) => self.handle_accounts_changed(source, &[account]),
            Ok(None) => self.handle_accounts_changed(source, &[]),
            Err(error) => warn!(%error, "failed to read account"),
        }

        match connector.chain_id().await {
            Ok(Some(chain)) => self.handle_chain_changed(source, chain),
            Ok(None) => {}
            Err(error) => warn!(%error, "failed to read chain id"),
        }
    }

    /// Balance of the connected account in wei. Missing balances count as zero.
    pub async fn refresh_balance(&self) -> u128 {
        let Some(account) = self.state().account().map(str::to_string) else {
            return 0;
        };
        let Some(connector) = self.active() else {
            return 0;
        };

        match connector.balance(&account).await {
            Ok(balance) => balance.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "failed to read balance");
                0
            }
        }
    }

    async fn restore_with(&self, connector: C) {
        let id = connector.id();
        if !connector.is_authorized().await {
            debug!(connector = %id, "stored wallet not authorized, skipping reconnect");
            return;
        }

        let started = self.update(|inner| {
            if !matches!(inner.session.connection, ConnectionState::Disconnected) {
                return false;
            }
            inner.session.connection = ConnectionState::Connecting { connector: id };
            true
        });
        if !started {
            return;
        }

        match self.activate_checked(&connector).await {
            Ok(activation) if self.is_connecting_with(id) => {
                self.update(|inner| {
                    inner.active = Some(Rc::new(connector));
                    inner.session.connection = ConnectionState::Connected {
                        connector: id,
                        account: activation.account,
                        chain_id: activation.chain_id,
                    };
                });
                info!(connector = %id, "wallet reconnected");
            }
            Ok(_) => connector.deactivate().await,
            Err(error) => {
                debug!(connector = %id, %error, "silent reconnect failed");
                if self.is_connecting_with(id) {
                    self.update(|inner| inner.session.connection = ConnectionState::Disconnected);
                }
            }
        }
    }

    async fn activate_checked(&self, connector: &C) -> Result<Activation> {
        let activation = connector.activate().await?;
        if !self.shared.config.is_supported_chain(activation.chain_id) {
            return Err(Error::UnsupportedChain(activation.chain_id));
        }
        Ok(activation)
    }

    fn stored_connector(&self) -> Option<ConnectorId> {
        let raw = match self.shared.store.load() {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "failed to read stored wallet selection");
                return None;
            }
        };

        match raw.parse::<ConnectorId>() {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "discarding stored wallet selection");
                if let Err(error) = self.shared.store.clear() {
                    warn!(%error, "failed to clear stored wallet selection");
                }
                None
            }
        }
    }

    fn persist(&self, id: ConnectorId) {
        if let Err(error) = self.shared.store.save(id.as_str()) {
            warn!(%error, "failed to persist wallet selection");
        }
    }

    fn reset(&self) -> Option<Rc<C>> {
        let active = self.update(|inner| {
            inner.session.connection = ConnectionState::Disconnected;
            inner.session.wallet_modal_open = false;
            inner.active.take()
        });
        if let Err(error) = self.shared.store.clear() {
            warn!(%error, "failed to clear stored wallet selection");
        }
        active
    }

    fn active(&self) -> Option<Rc<C>> {
        self.shared.inner.borrow().active.clone()
    }

    /// Whether `source` is the connector of the live connection.
    fn is_active_source(&self, source: ConnectorId) -> bool {
        matches!(
            self.shared.inner.borrow().session.connection,
            ConnectionState::Connected { connector, .. } if connector == source
        )
    }

    fn is_connecting_with(&self, id: ConnectorId) -> bool {
        matches!(
            self.shared.inner.borrow().session.connection,
            ConnectionState::Connecting { connector } if connector == id
        )
    }

    /// Mutate under the borrow, then notify observers once it is released.
    fn update<R>(&self, f: impl FnOnce(&mut Inner<C>) -> R) -> R {
        let (result, session) = {
            let mut inner = self.shared.inner.borrow_mut();
            let result = f(&mut inner);
            (result, inner.session.clone())
        };

        let observers = self.shared.observers.borrow().clone();
        for observer in observers {
            observer(&session);
        }
        result
    }
}
