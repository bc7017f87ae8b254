use near_api::{AccountId, NearToken};
use serde_json::{json, Value};

use crate::error::RemoteCallError;

use super::ContractHandle;

/// The VEX staking contract. Stakes arrive through `ft_transfer_call` on the
/// token contracts, so only reads and reserve management live here.
#[derive(Debug, Clone, Copy)]
pub struct StakingContract<'s>(ContractHandle<'s>);

impl<'s> StakingContract<'s> {
    pub fn new(handle: ContractHandle<'s>) -> Self {
        Self(handle)
    }

    pub fn contract_id(&self) -> &AccountId {
        self.0.contract_id()
    }

    pub async fn get_stake_info(&self, account_id: &AccountId) -> Result<Value, RemoteCallError> {
        self.0
            .view("get_stake_info", json!({ "account_id": account_id }))
            .await
    }

    /// VEX paid out per USDC at the current reserves.
    pub async fn get_vex_out(&self) -> Result<Value, RemoteCallError> {
        self.0.view("get_vex_out", json!({})).await
    }

    /// Total claimable amount held by the contract.
    pub async fn get_total(&self) -> Result<Value, RemoteCallError> {
        self.0.view("get_total", json!({})).await
    }

    pub async fn cover_usdc(&self, amount: &str) -> Result<Value, RemoteCallError> {
        self.0
            .call(
                "cover_usdc",
                json!({ "amount": amount }),
                NearToken::from_yoctonear(0),
            )
            .await
    }
}
