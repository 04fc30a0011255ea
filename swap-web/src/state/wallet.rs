//! Wallet state
//!
//! [`WalletHandle`] owns the connection manager and mirrors its [`Session`]
//! into signals. It is created once by the app and passed down as a prop.

use leptos::prelude::*;
use lib_core::wallet::{ConnectionManager, ConnectionState, Connector, ConnectorId, Session};
use lib_core::{ChainId, Config};

use crate::services::{LocalStorageStore, WalletConnector};
use crate::state::notifications::Toasts;

type Manager = ConnectionManager<WalletConnector, LocalStorageStore, Toasts>;

#[derive(Clone, Copy)]
pub struct WalletHandle {
    pub session: RwSignal<Session>,
    /// Set once the page-load reconnection attempt has finished.
    pub eager_tried: RwSignal<bool>,
    /// Balance of the connected account in wei.
    pub balance: RwSignal<Option<u128>>,
    manager: StoredValue<Manager, LocalStorage>,
    config: StoredValue<Config>,
}

impl WalletHandle {
    pub fn new(config: Config, toasts: Toasts) -> Self {
        let store = LocalStorageStore::new(config.storage_key.clone());
        let manager: Manager = ConnectionManager::new(config.clone(), store, toasts);

        let session = RwSignal::new(manager.session());
        manager.subscribe(move |next| session.set(next.clone()));

        Self {
            session,
            eager_tried: RwSignal::new(false),
            balance: RwSignal::new(None),
            manager: StoredValue::new_local(manager),
            config: StoredValue::new(config),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.session.with(|s| s.connection.clone())
    }

    pub fn is_connected(&self) -> bool {
        self.session.with(|s| s.connection.is_connected())
    }

    pub fn account(&self) -> Option<String> {
        self.session.with(|s| s.connection.account().map(str::to_string))
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        self.session.with(|s| s.connection.chain_id())
    }

    pub fn modal_open(&self) -> bool {
        self.session.with(|s| s.wallet_modal_open)
    }

    pub fn on_connect_click(&self) {
        self.manager.get_value().on_connect_click();
    }

    pub fn close_modal(&self) {
        self.manager.get_value().close_wallet_modal();
    }

    pub fn connect(&self, id: ConnectorId) {
        let handle = *self;
        let manager = self.manager.get_value();
        let connector = WalletConnector::for_id(id, &self.config.get_value());

        leptos::task::spawn_local(async move {
            if let Err(e) = manager.connect(connector.clone()).await {
                log::warn!("Connecting {} failed: {}", id, e);
                return;
            }
            if manager.state().connector() == Some(id) && manager.state().is_connected() {
                handle.watch(&connector);
                handle.refresh_balance();
            }
        });
    }

    pub fn disconnect(&self) {
        let manager = self.manager.get_value();
        self.balance.set(None);
        leptos::task::spawn_local(async move {
            manager.disconnect().await;
        });
    }

    /// Reconnect the previously selected wallet without prompting.
    pub fn restore(&self) {
        let handle = *self;
        let manager = self.manager.get_value();
        let config = self.config.get_value();

        leptos::task::spawn_local(async move {
            manager
                .restore(|id| Some(WalletConnector::for_id(id, &config)))
                .await;

            if let Some(id) = manager.state().connector().filter(|_| manager.state().is_connected()) {
                handle.watch(&WalletConnector::for_id(id, &config));
                handle.refresh_balance();
            }
            handle.eager_tried.set(manager.eager_attempted());
        });
    }

    pub fn refresh_balance(&self) {
        let manager = self.manager.get_value();
        let balance = self.balance;
        leptos::task::spawn_local(async move {
            // Providers without events may have switched account silently.
            manager.refresh_identity().await;
            let wei = manager.refresh_balance().await;
            balance.set(manager.state().is_connected().then_some(wei));
        });
    }

    fn watch(&self, connector: &WalletConnector) {
        let handle = *self;
        let source = connector.id();
        let watched = connector.watch(
            move |accounts| {
                handle.manager.get_value().handle_accounts_changed(source, &accounts);
                handle.after_provider_event();
            },
            move |chain| {
                handle.manager.get_value().handle_chain_changed(source, chain);
                handle.after_provider_event();
            },
            move || {
                handle.manager.get_value().handle_provider_disconnect(source);
                handle.balance.set(None);
            },
        );
        log::debug!("Provider events watched: {}", watched);
    }

    fn after_provider_event(&self) {
        if self.manager.get_value().state().is_connected() {
            self.refresh_balance();
        } else {
            self.balance.set(None);
        }
    }
}
