use tracing::info;
use vex_ledger::contracts::{FungibleToken, StakingContract};

use crate::participants::Role;

use super::{ScenarioContext, ScenarioFailure, Steps};

const STAKE_MSG: &str = "stake";

pub(super) async fn run(
    ctx: &ScenarioContext<'_>,
    steps: &mut Steps,
    owner_amount: &str,
    user_amount: &str,
) -> Result<(), ScenarioFailure> {
    let owner = &ctx.participants.owner;
    let user = ctx
        .participants
        .user()
        .map_err(|e| ScenarioFailure::setup(Role::User, &e))?;
    let staking_id = &ctx.config.staking_contract;

    for (participant, amount) in [(owner, owner_amount), (user, user_amount)] {
        let vex = FungibleToken::new(participant.session.contract(&ctx.config.vex_token));
        steps
            .record(
                &format!("ft_transfer_call {amount} from {}", participant.id),
                vex.ft_transfer_call(staking_id, amount, STAKE_MSG),
            )
            .await?;
    }

    let staking = StakingContract::new(owner.session.contract(staking_id));
    let owner_stake = steps
        .record(
            &format!("get_stake_info {}", owner.id),
            staking.get_stake_info(&owner.id),
        )
        .await?;
    let user_stake = steps
        .record(
            &format!("get_stake_info {}", user.id),
            staking.get_stake_info(&user.id),
        )
        .await?;

    info!(owner = %owner_stake, user = %user_stake, "stake records");
    Ok(())
}
