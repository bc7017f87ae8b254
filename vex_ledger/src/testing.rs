//! Scripted in-memory [Ledger] for exercising sessions and scenarios without a
//! network.

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use async_trait::async_trait;
use near_api::{AccountId, NearGas, NearToken};
use serde_json::Value;

use crate::{
    error::{CallKind, RemoteCallError},
    ledger::Ledger,
};

/// Well-formed ed25519 key that controls no real account.
pub const TEST_SECRET_KEY: &str =
    "ed25519:2yuSQrvE7CJzX4f49mWQb4X3bpjtTx6t3HEwUx6Bu3aG9eQ2YTwoHwnc1syFmqgH79cFnzHzfStAcHWVs9nAuXgQ";

#[derive(Debug, Clone, PartialEq)]
pub struct IssuedOperation {
    pub kind: CallKind,
    pub contract_id: AccountId,
    pub method: String,
    pub args: Value,
    /// `None` for views
    pub gas: Option<NearGas>,
    pub deposit: Option<NearToken>,
}

type ResponseKey = (CallKind, AccountId, String);

/// Responses are queued per (kind, contract, method). Each operation consumes
/// the head of its queue; the last entry keeps answering once the rest are
/// used up. Unscripted operations succeed with `null`.
#[derive(Default)]
pub struct MockLedger {
    responses: Mutex<HashMap<ResponseKey, VecDeque<Result<Value, String>>>>,
    issued: Mutex<Vec<IssuedOperation>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_view(&self, contract_id: &AccountId, method: &str, value: Value) {
        self.script(CallKind::View, contract_id, method, Ok(value));
    }

    pub fn respond_call(&self, contract_id: &AccountId, method: &str, value: Value) {
        self.script(CallKind::Call, contract_id, method, Ok(value));
    }

    pub fn fail_view(&self, contract_id: &AccountId, method: &str, message: &str) {
        self.script(CallKind::View, contract_id, method, Err(message.to_owned()));
    }

    pub fn fail_call(&self, contract_id: &AccountId, method: &str, message: &str) {
        self.script(CallKind::Call, contract_id, method, Err(message.to_owned()));
    }

    /// Everything issued so far, in order.
    pub fn issued(&self) -> Vec<IssuedOperation> {
        self.issued.lock().unwrap().clone()
    }

    fn script(
        &self,
        kind: CallKind,
        contract_id: &AccountId,
        method: &str,
        response: Result<Value, String>,
    ) {
        self.responses
            .lock()
            .unwrap()
            .entry((kind, contract_id.clone(), method.to_owned()))
            .or_default()
            .push_back(response);
    }

    fn respond(
        &self,
        operation: IssuedOperation,
    ) -> Result<Value, RemoteCallError> {
        let key = (
            operation.kind,
            operation.contract_id.clone(),
            operation.method.clone(),
        );
        let response = {
            let mut responses = self.responses.lock().unwrap();
            match responses.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        let result = match response {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(RemoteCallError::new(
                operation.kind,
                &operation.contract_id,
                &operation.method,
                message,
            )),
            None => Ok(Value::Null),
        };

        self.issued.lock().unwrap().push(operation);
        result
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn view(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: Value,
    ) -> Result<Value, RemoteCallError> {
        self.respond(IssuedOperation {
            kind: CallKind::View,
            contract_id: contract_id.clone(),
            method: method.to_owned(),
            args,
            gas: None,
            deposit: None,
        })
    }

    async fn call(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: Value,
        gas: NearGas,
        deposit: NearToken,
    ) -> Result<Value, RemoteCallError> {
        self.respond(IssuedOperation {
            kind: CallKind::Call,
            contract_id: contract_id.clone(),
            method: method.to_owned(),
            args,
            gas: Some(gas),
            deposit: Some(deposit),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn queued_responses_then_sticky_last() {
        let ledger = MockLedger::new();
        let token: AccountId = "token.testnet".parse().unwrap();
        ledger.respond_call(&token, "storage_deposit", json!({ "total": "1" }));
        ledger.fail_call(&token, "storage_deposit", "already registered");

        let call = || {
            ledger.call(
                &token,
                "storage_deposit",
                json!({}),
                NearGas::from_tgas(1),
                NearToken::from_yoctonear(0),
            )
        };

        assert_eq!(call().await.unwrap(), json!({ "total": "1" }));
        let err = call().await.unwrap_err();
        assert_eq!(err.kind, CallKind::Call);
        assert_eq!(err.method, "storage_deposit");
        assert_eq!(err.message, "already registered");
        assert!(call().await.is_err());

        assert_eq!(ledger.issued().len(), 3);
    }

    #[tokio::test]
    async fn unscripted_view_is_null() {
        let ledger = MockLedger::new();
        let token: AccountId = "token.testnet".parse().unwrap();

        assert_eq!(
            ledger.view(&token, "anything", json!({})).await.unwrap(),
            Value::Null
        );
        assert_eq!(ledger.issued()[0].kind, CallKind::View);
    }
}
