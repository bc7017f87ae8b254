use near_api::{AccountId, NearToken};
use serde_json::{json, Value};

use crate::error::RemoteCallError;

use super::ContractHandle;

/// Deposit covering one account's storage on a token contract (0.01 NEAR).
pub const STORAGE_DEPOSIT: NearToken = NearToken::from_yoctonear(10_000_000_000_000_000_000_000);

/// `ft_transfer_call` requires exactly one attached yoctoNEAR.
pub const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

/// NEP-141 token with storage management.
#[derive(Debug, Clone, Copy)]
pub struct FungibleToken<'s>(ContractHandle<'s>);

impl<'s> FungibleToken<'s> {
    pub fn new(handle: ContractHandle<'s>) -> Self {
        Self(handle)
    }

    pub fn contract_id(&self) -> &AccountId {
        self.0.contract_id()
    }

    /// Pre-pay storage so `account_id` can hold this token. Fails remotely if
    /// the account is already registered.
    pub async fn storage_deposit(
        &self,
        account_id: &AccountId,
        deposit: NearToken,
    ) -> Result<Value, RemoteCallError> {
        self.0
            .call(
                "storage_deposit",
                json!({ "account_id": account_id }),
                deposit,
            )
            .await
    }

    /// `amount` is a decimal string in the token's smallest unit.
    pub async fn mint(&self, account_id: &AccountId, amount: &str) -> Result<Value, RemoteCallError> {
        self.0
            .call(
                "mint",
                json!({ "account_id": account_id, "amount": amount }),
                NearToken::from_yoctonear(0),
            )
            .await
    }

    /// Transfer to `receiver_id` and notify it with `msg` (e.g. "stake").
    pub async fn ft_transfer_call(
        &self,
        receiver_id: &AccountId,
        amount: &str,
        msg: &str,
    ) -> Result<Value, RemoteCallError> {
        self.0
            .call(
                "ft_transfer_call",
                json!({ "receiver_id": receiver_id, "amount": amount, "msg": msg }),
                ONE_YOCTO,
            )
            .await
    }

    pub async fn ft_balance_of(&self, account_id: &AccountId) -> Result<Value, RemoteCallError> {
        self.0
            .view("ft_balance_of", json!({ "account_id": account_id }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use near_api::NearToken;
    use serde_json::json;

    use crate::{
        config::resolve,
        contracts::FungibleToken,
        error::CallKind,
        session::Session,
        testing::MockLedger,
    };

    use super::{ONE_YOCTO, STORAGE_DEPOSIT};

    #[test]
    fn deposit_constants() {
        assert_eq!(STORAGE_DEPOSIT, NearToken::from_millinear(10));
        assert_eq!(ONE_YOCTO.as_yoctonear(), 1);
    }

    #[tokio::test]
    async fn token_methods_issue_expected_operations() {
        let conf = resolve("testnet").unwrap();
        let ledger = Arc::new(MockLedger::new());
        ledger.respond_view(&conf.vex_token, "ft_balance_of", json!("42"));
        let session = Session::with_ledger(&conf, conf.owner_account.clone(), ledger.clone());

        let vex = FungibleToken::new(session.contract(&conf.vex_token));
        vex.storage_deposit(&conf.staking_contract, STORAGE_DEPOSIT)
            .await
            .unwrap();
        vex.mint(&conf.owner_account, "10").await.unwrap();
        vex.ft_transfer_call(&conf.staking_contract, "5", "stake")
            .await
            .unwrap();
        let balance = vex.ft_balance_of(&conf.owner_account).await.unwrap();

        assert_eq!(balance, json!("42"));

        let issued = ledger.issued();
        let methods: Vec<_> = issued.iter().map(|op| op.method.as_str()).collect();
        assert_eq!(
            methods,
            ["storage_deposit", "mint", "ft_transfer_call", "ft_balance_of"]
        );
        assert!(issued.iter().all(|op| op.contract_id == conf.vex_token));

        assert_eq!(issued[0].deposit, Some(STORAGE_DEPOSIT));
        assert_eq!(
            issued[0].args,
            json!({ "account_id": "stake.vex-betting.testnet" })
        );
        assert_eq!(issued[1].deposit, Some(NearToken::from_yoctonear(0)));
        assert_eq!(
            issued[1].args,
            json!({ "account_id": "vier1near.testnet", "amount": "10" })
        );
        assert_eq!(issued[2].deposit, Some(ONE_YOCTO));
        assert_eq!(
            issued[2].args,
            json!({ "receiver_id": "stake.vex-betting.testnet", "amount": "5", "msg": "stake" })
        );
        assert_eq!(issued[3].kind, CallKind::View);
    }
}
