use tracing::info;
use vex_ledger::contracts::FungibleToken;

use super::{ScenarioContext, ScenarioFailure, Steps};

pub(super) async fn run(ctx: &ScenarioContext<'_>, steps: &mut Steps) -> Result<(), ScenarioFailure> {
    let session = &ctx.participants.owner.session;
    let vex = FungibleToken::new(session.contract(&ctx.config.vex_token));

    let balance = steps
        .record(
            "ft_balance_of",
            vex.ft_balance_of(&ctx.config.staking_contract),
        )
        .await?;

    info!(%balance, "staking contract vex balance");
    Ok(())
}
