use tracing::info;
use vex_ledger::{contracts::FungibleToken, AccountId};

use super::{ScenarioContext, ScenarioFailure, Steps};

pub(super) async fn run(
    ctx: &ScenarioContext<'_>,
    steps: &mut Steps,
    amount: &str,
    recipient: Option<&AccountId>,
) -> Result<(), ScenarioFailure> {
    let owner = &ctx.participants.owner;
    let recipient = recipient.unwrap_or(&owner.id);
    let vex = FungibleToken::new(owner.session.contract(&ctx.config.vex_token));

    steps
        .record(&format!("mint {amount} to {recipient}"), vex.mint(recipient, amount))
        .await?;
    let balance = steps
        .record("ft_balance_of", vex.ft_balance_of(recipient))
        .await?;

    info!(%recipient, %balance, "minted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vex_ledger::{error::CallKind, NearToken};

    use crate::scenarios::{run_scenario, test_utils::fixture, Scenario, ScenarioContext, StepOutcome};

    #[tokio::test]
    async fn mints_to_owner_then_reads_balance() {
        let fx = fixture();
        fx.owner_ledger.respond_view(
            &fx.config.vex_token,
            "ft_balance_of",
            json!("199999998000000000000"),
        );
        let ctx = ScenarioContext::new(&fx.config, &fx.participants);

        let report = run_scenario(
            &Scenario::Mint {
                amount: "99999999000000000000".to_owned(),
                recipient: None,
            },
            &ctx,
        )
        .await;
        assert!(report.is_completed());

        let issued = fx.owner_ledger.issued();
        assert_eq!(issued.len(), 2);
        assert_eq!(issued[0].kind, CallKind::Call);
        assert_eq!(issued[0].method, "mint");
        assert_eq!(issued[0].contract_id, fx.config.vex_token);
        assert_eq!(
            issued[0].args,
            json!({ "account_id": "vier1near.testnet", "amount": "99999999000000000000" })
        );
        assert_eq!(issued[0].gas, Some(fx.config.gas_budget()));
        assert_eq!(issued[0].deposit, Some(NearToken::from_yoctonear(0)));
        assert_eq!(issued[1].args, json!({ "account_id": "vier1near.testnet" }));

        // balance covers the minted amount
        let StepOutcome::Ok { response } = &report.steps[1].outcome else {
            panic!("balance read failed");
        };
        let balance: u128 = response.as_str().unwrap().parse().unwrap();
        assert!(balance >= 99999999000000000000);
    }

    #[tokio::test]
    async fn failed_mint_skips_balance_read() {
        let fx = fixture();
        fx.owner_ledger
            .fail_call(&fx.config.vex_token, "mint", "Exceeds max supply");
        let ctx = ScenarioContext::new(&fx.config, &fx.participants);

        let report = run_scenario(
            &Scenario::Mint {
                amount: "1".to_owned(),
                recipient: Some("bob.testnet".parse().unwrap()),
            },
            &ctx,
        )
        .await;

        assert!(!report.is_completed());
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.steps[0].operation, "mint 1 to bob.testnet");
        assert_eq!(fx.owner_ledger.issued().len(), 1);
    }
}
