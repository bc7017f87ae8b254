use std::{fmt, sync::Arc};

use async_trait::async_trait;
use near_api::{AccountId, Contract, NearGas, NearToken, Signer};
use serde_json::Value;
use tracing::debug;

use crate::error::{CallKind, RemoteCallError};

/// The two primitives the harness consumes from the remote ledger.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Read-only query. No fee, no state mutation.
    async fn view(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: Value,
    ) -> Result<Value, RemoteCallError>;

    /// State-changing call, signed by the account this ledger is bound to.
    async fn call(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: Value,
        gas: NearGas,
        deposit: NearToken,
    ) -> Result<Value, RemoteCallError>;
}

/// [Ledger] backed by NEAR JSON-RPC through `near_api`.
pub struct NearLedger {
    network: near_api::NetworkConfig,
    signer_id: AccountId,
    signer: Arc<Signer>,
}

impl NearLedger {
    pub fn new(network: near_api::NetworkConfig, signer_id: AccountId, signer: Arc<Signer>) -> Self {
        Self {
            network,
            signer_id,
            signer,
        }
    }
}

#[async_trait]
impl Ledger for NearLedger {
    async fn view(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: Value,
    ) -> Result<Value, RemoteCallError> {
        let err = |e: String| RemoteCallError::new(CallKind::View, contract_id, method, e);

        debug!(contract = %contract_id, method, "view");
        let response = Contract(contract_id.clone())
            .call_function(method, args)
            .map_err(|e| err(remote_message(e)))?
            .read_only::<Value>()
            .fetch_from(&self.network)
            .await
            .map_err(|e| err(remote_message(e)))?;

        Ok(response.data)
    }

    async fn call(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: Value,
        gas: NearGas,
        deposit: NearToken,
    ) -> Result<Value, RemoteCallError> {
        let err = |e: String| RemoteCallError::new(CallKind::Call, contract_id, method, e);

        debug!(
            contract = %contract_id,
            method,
            signer = %self.signer_id,
            %gas,
            %deposit,
            "call"
        );
        let outcome = Contract(contract_id.clone())
            .call_function(method, args)
            .map_err(|e| err(remote_message(e)))?
            .transaction()
            .gas(gas)
            .deposit(deposit)
            .with_signer(self.signer_id.clone(), self.signer.clone())
            .send_to(&self.network)
            .await
            .map_err(|e| err(remote_message(e)))?;

        let success = outcome
            .into_result()
            .map_err(|e| err(remote_message(e)))?;
        let bytes = success.raw_bytes().map_err(|e| err(remote_message(e)))?;

        decode_return_value(&bytes).map_err(err)
    }
}

/// Display form of an SDK error on a single line. A failed transaction renders
/// as its execution error only, without the receipts.
fn remote_message(e: impl fmt::Display) -> String {
    e.to_string().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Contract methods that return nothing produce empty bytes.
fn decode_return_value(bytes: &[u8]) -> Result<Value, String> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| format!("undecodable return value: {e}"))
}
