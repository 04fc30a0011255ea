//! Ethereum wallet connectors via wasm-bindgen
//!
//! MetaMask is reached through the injected EIP-1193 `window.ethereum`;
//! WalletConnect through the v1 UMD bundle (`window.WalletConnectProvider`)
//! loaded by `index.html`. Both are driven with the same `request` calls.

use async_trait::async_trait;
use js_sys::Reflect;
use lib_core::wallet::{Activation, Connector, ConnectorId};
use lib_core::{ChainId, Config, Error, Result};
use wasm_bindgen::prelude::*;

/// EIP-1193 error code for a request the user rejected.
const USER_REJECTED_CODE: i64 = 4001;

// ============================================================================
// PROVIDER BINDINGS (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
let walletConnect = null;

function injected() {
    return window.ethereum || null;
}

function walletConnectProvider(infuraId) {
    if (walletConnect) {
        return walletConnect;
    }
    const umd = window.WalletConnectProvider;
    if (!umd) {
        return null;
    }
    const Provider = umd.default || umd;
    walletConnect = new Provider({ infuraId: infuraId || undefined, qrcode: true, pollingInterval: 15000 });
    return walletConnect;
}

function provider(kind, infuraId) {
    return kind === 'WalletConnect' ? walletConnectProvider(infuraId) : injected();
}

export function hasInjectedProvider() {
    return !!injected();
}

export function isMetaMaskInstalled() {
    const eth = injected();
    return !!(eth && eth.isMetaMask);
}

export function hasProvider(kind, infuraId) {
    return !!provider(kind, infuraId);
}

export function hasWalletConnectSession() {
    try {
        return !!window.localStorage.getItem('walletconnect');
    } catch (e) {
        return false;
    }
}

export async function enableProvider(kind, infuraId) {
    const p = provider(kind, infuraId);
    if (!p) {
        throw { code: -1, message: kind + ' provider not found' };
    }
    if (kind === 'WalletConnect') {
        return await p.enable();
    }
    return await p.request({ method: 'eth_requestAccounts' });
}

export async function providerRequest(kind, infuraId, method, params) {
    const p = provider(kind, infuraId);
    if (!p) {
        throw { code: -1, message: kind + ' provider not found' };
    }
    return await p.request({ method: method, params: params || [] });
}

export async function closeProvider(kind) {
    if (kind !== 'WalletConnect' || !walletConnect) {
        return;
    }
    const p = walletConnect;
    walletConnect = null;
    await p.disconnect();
}

export function subscribeProvider(kind, infuraId, onAccounts, onChain, onDisconnect) {
    const p = provider(kind, infuraId);
    if (!p || typeof p.on !== 'function' || p.__matisseWatched) {
        return false;
    }
    p.__matisseWatched = true;
    p.on('accountsChanged', (accounts) => onAccounts(accounts || []));
    p.on('chainChanged', (chainId) => onChain(String(chainId)));
    p.on('disconnect', () => onDisconnect());
    return true;
}
")]
extern "C" {
    fn hasInjectedProvider() -> bool;

    fn isMetaMaskInstalled() -> bool;

    fn hasProvider(kind: &str, infura_id: Option<String>) -> bool;

    fn hasWalletConnectSession() -> bool;

    #[wasm_bindgen(catch)]
    async fn enableProvider(kind: &str, infura_id: Option<String>) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn providerRequest(
        kind: &str,
        infura_id: Option<String>,
        method: &str,
        params: JsValue,
    ) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn closeProvider(kind: &str) -> std::result::Result<JsValue, JsValue>;

    fn subscribeProvider(
        kind: &str,
        infura_id: Option<String>,
        on_accounts: &JsValue,
        on_chain: &JsValue,
        on_disconnect: &JsValue,
    ) -> bool;
}

/// Whether any EIP-1193 provider is injected into the page.
pub fn has_injected_provider() -> bool {
    hasInjectedProvider()
}

/// Whether the injected provider is MetaMask.
pub fn is_metamask_installed() -> bool {
    isMetaMaskInstalled()
}

/// Translate a rejected provider promise into a core error.
fn js_error(value: JsValue) -> Error {
    let code = Reflect::get(&value, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64());
    if code == Some(USER_REJECTED_CODE as f64) {
        return Error::UserRejected;
    }

    let message = Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));

    // WalletConnect signals a closed QR modal with a plain message, no code.
    if message.contains("User closed modal") {
        return Error::UserRejected;
    }
    Error::Provider(message)
}

fn decode_accounts(value: JsValue) -> Result<Vec<String>> {
    serde_wasm_bindgen::from_value(value).map_err(|e| Error::Provider(format!("Invalid accounts: {}", e)))
}

fn decode_chain(value: &JsValue) -> Result<ChainId> {
    if let Some(raw) = value.as_string() {
        return ChainId::from_hex(&raw);
    }
    match value.as_f64() {
        Some(id) => ChainId::from_number(id),
        None => Err(Error::Provider(format!("Invalid chain id: {:?}", value))),
    }
}

// ============================================================================
// CONNECTORS
// ============================================================================

/// One variant per supported wallet, selected explicitly from [`ConnectorId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletConnector {
    MetaMask,
    WalletConnect { infura_id: Option<String> },
}

impl WalletConnector {
    pub fn for_id(id: ConnectorId, config: &Config) -> Self {
        match id {
            ConnectorId::MetaMask => WalletConnector::MetaMask,
            ConnectorId::WalletConnect => WalletConnector::WalletConnect {
                infura_id: config.infura_id.clone(),
            },
        }
    }

    fn kind(&self) -> &'static str {
        self.id().as_str()
    }

    fn infura_id(&self) -> Option<String> {
        match self {
            WalletConnector::MetaMask => None,
            WalletConnector::WalletConnect { infura_id } => infura_id.clone(),
        }
    }

    async fn request(&self, method: &str, params: &[&str]) -> Result<JsValue> {
        let params = serde_wasm_bindgen::to_value(params)
            .map_err(|e| Error::Provider(format!("Invalid request params: {}", e)))?;
        providerRequest(self.kind(), self.infura_id(), method, params)
            .await
            .map_err(js_error)
    }

    /// Forward `accountsChanged`, `chainChanged` and `disconnect` events.
    ///
    /// Each provider object is subscribed at most once; returns false when the
    /// provider was already watched or does not emit events.
    pub fn watch<A, C, D>(&self, on_accounts: A, on_chain: C, on_disconnect: D) -> bool
    where
        A: Fn(Vec<String>) + 'static,
        C: Fn(ChainId) + 'static,
        D: Fn() + 'static,
    {
        let on_accounts = Closure::<dyn Fn(JsValue)>::new(move |accounts: JsValue| match decode_accounts(accounts) {
            Ok(accounts) => on_accounts(accounts),
            Err(e) => log::warn!("Ignoring accountsChanged event: {}", e),
        });
        let on_chain = Closure::<dyn Fn(JsValue)>::new(move |chain: JsValue| match decode_chain(&chain) {
            Ok(chain) => on_chain(chain),
            Err(e) => log::warn!("Ignoring chainChanged event: {}", e),
        });
        let on_disconnect = Closure::<dyn Fn()>::new(on_disconnect);

        // Listeners live as long as the page; hand ownership to the JS GC.
        subscribeProvider(
            self.kind(),
            self.infura_id(),
            &on_accounts.into_js_value(),
            &on_chain.into_js_value(),
            &on_disconnect.into_js_value(),
        )
    }
}

#[async_trait(?Send)]
impl Connector for WalletConnector {
    fn id(&self) -> ConnectorId {
        match self {
            WalletConnector::MetaMask => ConnectorId::MetaMask,
            WalletConnector::WalletConnect { .. } => ConnectorId::WalletConnect,
        }
    }

    async fn activate(&self) -> Result<Activation> {
        if !hasProvider(self.kind(), self.infura_id()) {
            return Err(Error::NoProvider(self.id()));
        }

        let accounts = enableProvider(self.kind(), self.infura_id())
            .await
            .map_err(js_error)
            .and_then(decode_accounts)?;
        let account = accounts
            .into_iter()
            .next()
            .ok_or_else(|| Error::Provider("Wallet returned no accounts".to_string()))?;

        let chain_id = self
            .chain_id()
            .await?
            .ok_or_else(|| Error::Provider("Wallet returned no chain id".to_string()))?;

        log::debug!("{} activated {} on chain {}", self.kind(), account, chain_id);
        Ok(Activation { account, chain_id })
    }

    async fn is_authorized(&self) -> bool {
        match self {
            WalletConnector::MetaMask => {
                if !hasInjectedProvider() {
                    return false;
                }
                matches!(self.account().await, Ok(Some(_)))
            }
            WalletConnector::WalletConnect { .. } => hasWalletConnectSession(),
        }
    }

    async fn deactivate(&self) {
        if let Err(e) = closeProvider(self.kind()).await {
            log::warn!("Failed to close {} session: {}", self.kind(), js_error(e));
        }
    }

    async fn account(&self) -> Result<Option<String>> {
        let accounts = decode_accounts(self.request("eth_accounts", &[]).await?)?;
        Ok(accounts.into_iter().next())
    }

    async fn chain_id(&self) -> Result<Option<ChainId>> {
        let value = self.request("eth_chainId", &[]).await?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        decode_chain(&value).map(Some)
    }

    async fn balance(&self, account: &str) -> Result<Option<u128>> {
        let value = self.request("eth_getBalance", &[account, "latest"]).await?;
        Ok(value.as_string().as_deref().and_then(lib_core::utils::parse_hex_quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_id_carries_infura_id() {
        let config = Config {
            infura_id: Some("abc123".to_string()),
            ..Config::default()
        };

        assert_eq!(WalletConnector::for_id(ConnectorId::MetaMask, &config), WalletConnector::MetaMask);
        let wc = WalletConnector::for_id(ConnectorId::WalletConnect, &config);
        assert_eq!(wc.id(), ConnectorId::WalletConnect);
        assert_eq!(wc.infura_id().as_deref(), Some("abc123"));
        assert_eq!(WalletConnector::MetaMask.infura_id(), None);
    }
}
