use near_api::{AccountId, NearToken};
use serde_json::Value;

use crate::{error::RemoteCallError, session::Session};

pub mod fungible_token;
pub mod ref_exchange;
pub mod staking;

pub use fungible_token::FungibleToken;
pub use ref_exchange::RefExchange;
pub use staking::StakingContract;

/// A contract id paired with the session used to reach it. Holds no state of
/// its own; everything lives on the ledger.
#[derive(Debug, Clone, Copy)]
pub struct ContractHandle<'s> {
    contract_id: &'s AccountId,
    session: &'s Session,
}

impl<'s> ContractHandle<'s> {
    pub fn new(contract_id: &'s AccountId, session: &'s Session) -> Self {
        Self {
            contract_id,
            session,
        }
    }

    pub fn contract_id(&self) -> &AccountId {
        self.contract_id
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    pub async fn view(&self, method: &str, args: Value) -> Result<Value, RemoteCallError> {
        self.session.view(self.contract_id, method, args).await
    }

    pub async fn call(
        &self,
        method: &str,
        args: Value,
        deposit: NearToken,
    ) -> Result<Value, RemoteCallError> {
        self.session
            .call(self.contract_id, method, args, deposit)
            .await
    }
}
