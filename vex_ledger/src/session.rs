use std::{collections::HashMap, fmt, sync::Arc};

use near_api::{AccountId, NearGas, NearToken, SecretKey, Signer};
use serde_json::Value;
use tracing::debug;

use crate::{
    config::{parse_account_id, NetworkConfig},
    contracts::ContractHandle,
    error::{KeyFormatError, RemoteCallError, SessionError},
    ledger::{Ledger, NearLedger},
};

/// In-memory key material, scoped by (network, account).
#[derive(Clone, Default)]
pub struct KeyStore {
    keys: HashMap<(String, AccountId), SecretKey>,
}

impl KeyStore {
    pub fn set_key(&mut self, network_id: &str, account_id: &AccountId, key: SecretKey) {
        self.keys
            .insert((network_id.to_owned(), account_id.clone()), key);
    }

    pub fn get_key(&self, network_id: &str, account_id: &AccountId) -> Option<&SecretKey> {
        self.keys.get(&(network_id.to_owned(), account_id.clone()))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// never print key material
impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.keys
                    .keys()
                    .map(|(network, account)| format!("{network}/{account}")),
            )
            .finish()
    }
}

/// An account bound to one connection to the ledger. Sessions never share
/// key material or connections with each other.
pub struct Session {
    network_id: String,
    account_id: AccountId,
    gas: NearGas,
    key_store: KeyStore,
    ledger: Arc<dyn Ledger>,
}

/// Register `private_key` for `account_id` and bind a signing connection to the
/// configured RPC endpoint. Nothing is sent over the network here: reachability
/// problems only show up once a call is issued.
pub fn create_session(
    config: &NetworkConfig,
    account_id: &str,
    private_key: &str,
) -> Result<Session, SessionError> {
    let account_id = parse_account_id("account_id", account_id)?;

    let key_format_error = |reason: String| KeyFormatError {
        account_id: account_id.to_string(),
        reason,
    };

    let secret_key = private_key
        .trim()
        .parse::<SecretKey>()
        .map_err(|e| key_format_error(e.to_string()))?;

    let mut key_store = KeyStore::default();
    key_store.set_key(&config.network_id, &account_id, secret_key);

    let secret_key = key_store
        .get_key(&config.network_id, &account_id)
        .cloned()
        .ok_or_else(|| key_format_error("key was not registered".to_owned()))?;
    let signer = Signer::new(Signer::from_secret_key(secret_key))
        .map_err(|e| key_format_error(e.to_string()))?;

    let ledger = NearLedger::new(config.near_network(), account_id.clone(), signer);

    debug!(account = %account_id, network = %config.network_id, "session created");

    Ok(Session {
        network_id: config.network_id.clone(),
        account_id,
        gas: config.gas_budget(),
        key_store,
        ledger: Arc::new(ledger),
    })
}

impl Session {
    /// Session over an arbitrary ledger backend, without key material.
    pub fn with_ledger(
        config: &NetworkConfig,
        account_id: AccountId,
        ledger: Arc<dyn Ledger>,
    ) -> Self {
        Self {
            network_id: config.network_id.clone(),
            account_id,
            gas: config.gas_budget(),
            key_store: KeyStore::default(),
            ledger,
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn gas(&self) -> NearGas {
        self.gas
    }

    pub fn key_store(&self) -> &KeyStore {
        &self.key_store
    }

    pub fn contract<'s>(&'s self, contract_id: &'s AccountId) -> ContractHandle<'s> {
        ContractHandle::new(contract_id, self)
    }

    pub async fn view(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: Value,
    ) -> Result<Value, RemoteCallError> {
        self.ledger.view(contract_id, method, args).await
    }

    /// Signed call with the network's gas budget.
    pub async fn call(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: Value,
        deposit: NearToken,
    ) -> Result<Value, RemoteCallError> {
        self.ledger
            .call(contract_id, method, args, self.gas, deposit)
            .await
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("network_id", &self.network_id)
            .field("account_id", &self.account_id)
            .field("gas", &self.gas)
            .field("key_store", &self.key_store)
            .finish_non_exhaustive()
    }
}
