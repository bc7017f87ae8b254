use tracing::info;
use vex_ledger::contracts::StakingContract;

use super::{ScenarioContext, ScenarioFailure, Steps};

pub(super) async fn run(
    ctx: &ScenarioContext<'_>,
    steps: &mut Steps,
    amount: &str,
) -> Result<(), ScenarioFailure> {
    let owner = &ctx.participants.owner;
    let staking = StakingContract::new(owner.session.contract(&ctx.config.staking_contract));

    let vex_out = steps.record("get_vex_out", staking.get_vex_out()).await?;
    steps
        .record(&format!("cover_usdc {amount}"), staking.cover_usdc(amount))
        .await?;
    let new_vex_out = steps.record("get_vex_out", staking.get_vex_out()).await?;

    info!(before = %vex_out, after = %new_vex_out, "vex_out");
    Ok(())
}
