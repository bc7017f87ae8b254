use tracing::info;
use vex_ledger::{
    contracts::{fungible_token::STORAGE_DEPOSIT, FungibleToken},
    AccountId,
};

use super::{ScenarioContext, ScenarioFailure, Steps};

/// (token, beneficiary) pairs that need storage before the contracts can be
/// used end to end.
pub(super) fn registrations(ctx: &ScenarioContext<'_>) -> Vec<(AccountId, AccountId)> {
    let conf = ctx.config;
    let user = &ctx.participants.user_id;

    vec![
        (conf.vex_token.clone(), conf.staking_contract.clone()),
        (conf.usdc_token.clone(), conf.staking_contract.clone()),
        (conf.vex_token.clone(), user.clone()),
        (conf.usdc_token.clone(), user.clone()),
        (conf.usdc_token.clone(), conf.betting_contract.clone()),
    ]
}

pub(super) async fn run(ctx: &ScenarioContext<'_>, steps: &mut Steps) -> Result<(), ScenarioFailure> {
    let owner = &ctx.participants.owner;

    for (token_id, beneficiary) in registrations(ctx) {
        let token = FungibleToken::new(owner.session.contract(&token_id));
        let operation = format!("storage_deposit {token_id} for {beneficiary}");

        steps
            .record(
                &operation,
                token.storage_deposit(&beneficiary, STORAGE_DEPOSIT),
            )
            .await?;
    }

    info!("storage registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vex_ledger::{contracts::fungible_token::STORAGE_DEPOSIT, error::CallKind};

    use crate::scenarios::{
        run_scenario, test_utils::fixture, Scenario, ScenarioContext, ScenarioStatus,
    };

    #[tokio::test]
    async fn registers_every_pair_from_the_owner() {
        let fx = fixture();
        let ctx = ScenarioContext::new(&fx.config, &fx.participants);

        let report = run_scenario(&Scenario::StorageDeposit, &ctx).await;
        assert!(report.is_completed());

        let issued = fx.owner_ledger.issued();
        assert_eq!(issued.len(), 5);
        assert!(issued.iter().all(|op| op.kind == CallKind::Call
            && op.method == "storage_deposit"
            && op.deposit == Some(STORAGE_DEPOSIT)));

        let pairs: Vec<_> = issued
            .iter()
            .map(|op| (op.contract_id.as_str(), op.args["account_id"].clone()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("vex.vex-betting.testnet", json!("stake.vex-betting.testnet")),
                ("cusd.fakes.testnet", json!("stake.vex-betting.testnet")),
                ("vex.vex-betting.testnet", json!("viernear.testnet")),
                ("cusd.fakes.testnet", json!("viernear.testnet")),
                ("cusd.fakes.testnet", json!("betting.vex-betting.testnet")),
            ]
        );
        // the user never signs here
        assert!(fx.user_ledger.issued().is_empty());
    }

    #[tokio::test]
    async fn second_funding_of_registered_pair_is_reported() {
        let fx = fixture();
        fx.owner_ledger.respond_call(
            &fx.config.vex_token,
            "storage_deposit",
            json!({ "total": "1250000000000000000000", "available": "0" }),
        );
        fx.owner_ledger.fail_call(
            &fx.config.vex_token,
            "storage_deposit",
            "The account is already registered",
        );
        let ctx = ScenarioContext::new(&fx.config, &fx.participants);

        let first = run_scenario(&Scenario::StorageDeposit, &ctx).await;
        assert!(!first.is_completed());
        // vex/staking, usdc/staking went through; vex/user hit the registered account
        assert_eq!(first.steps.len(), 3);

        let second = run_scenario(&Scenario::StorageDeposit, &ctx).await;
        match second.status {
            ScenarioStatus::Aborted { operation, error } => {
                assert_eq!(
                    operation,
                    "storage_deposit vex.vex-betting.testnet for stake.vex-betting.testnet"
                );
                assert!(error.contains("already registered"));
            }
            ScenarioStatus::Completed => panic!("second funding should be reported"),
        }
        assert_eq!(second.steps.len(), 1);
    }
}
