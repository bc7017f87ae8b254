use serde_json::Value;
use tracing::info;
use vex_ledger::contracts::{FungibleToken, StakingContract};

use super::{ScenarioContext, ScenarioFailure, Steps};

const EXCHANGE_MSG: &str = "stake";

/// Staking contract state observed at one point of the exchange.
#[derive(Debug)]
struct Reserves {
    vex_out: Value,
    claimable: Value,
    vex_balance: Value,
    usdc_balance: Value,
}

async fn read_reserves(
    steps: &mut Steps,
    staking: &StakingContract<'_>,
    vex: &FungibleToken<'_>,
    usdc: &FungibleToken<'_>,
) -> Result<Reserves, ScenarioFailure> {
    let staking_id = staking.contract_id();

    let vex_out = steps.record("get_vex_out", staking.get_vex_out()).await?;
    let claimable = steps.record("get_total", staking.get_total()).await?;
    let vex_balance = steps
        .record(
            &format!("ft_balance_of {}", vex.contract_id()),
            vex.ft_balance_of(staking_id),
        )
        .await?;
    let usdc_balance = steps
        .record(
            &format!("ft_balance_of {}", usdc.contract_id()),
            usdc.ft_balance_of(staking_id),
        )
        .await?;

    Ok(Reserves {
        vex_out,
        claimable,
        vex_balance,
        usdc_balance,
    })
}

pub(super) async fn run(
    ctx: &ScenarioContext<'_>,
    steps: &mut Steps,
    amount: &str,
) -> Result<(), ScenarioFailure> {
    let session = &ctx.participants.owner.session;
    let staking = StakingContract::new(session.contract(&ctx.config.staking_contract));
    let vex = FungibleToken::new(session.contract(&ctx.config.vex_token));
    let usdc = FungibleToken::new(session.contract(&ctx.config.usdc_token));

    let before = read_reserves(steps, &staking, &vex, &usdc).await?;
    info!(
        vex_out = %before.vex_out,
        claimable = %before.claimable,
        vex = %before.vex_balance,
        usdc = %before.usdc_balance,
        "before exchange"
    );

    steps
        .record(
            &format!("ft_transfer_call {amount} usdc"),
            usdc.ft_transfer_call(staking.contract_id(), amount, EXCHANGE_MSG),
        )
        .await?;

    let after = read_reserves(steps, &staking, &vex, &usdc).await?;
    info!(
        vex_out = %after.vex_out,
        claimable = %after.claimable,
        vex = %after.vex_balance,
        usdc = %after.usdc_balance,
        "after exchange"
    );

    Ok(())
}
