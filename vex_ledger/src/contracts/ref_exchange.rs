use near_api::AccountId;
use serde_json::{json, Value};

use crate::error::RemoteCallError;

use super::ContractHandle;

/// Ref Finance exchange, read-only.
#[derive(Debug, Clone, Copy)]
pub struct RefExchange<'s>(ContractHandle<'s>);

impl<'s> RefExchange<'s> {
    pub fn new(handle: ContractHandle<'s>) -> Self {
        Self(handle)
    }

    pub fn contract_id(&self) -> &AccountId {
        self.0.contract_id()
    }

    pub async fn get_pool(&self, pool_id: u64) -> Result<Value, RemoteCallError> {
        self.0.view("get_pool", json!({ "pool_id": pool_id })).await
    }
}
