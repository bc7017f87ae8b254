use tracing::info;
use vex_ledger::contracts::RefExchange;

use super::{ScenarioContext, ScenarioFailure, Steps};

pub(super) async fn run(
    ctx: &ScenarioContext<'_>,
    steps: &mut Steps,
    pool_id: u64,
) -> Result<(), ScenarioFailure> {
    let session = &ctx.participants.owner.session;
    let exchange = RefExchange::new(session.contract(&ctx.config.ref_exchange));

    let pool = steps
        .record(&format!("get_pool {pool_id}"), exchange.get_pool(pool_id))
        .await?;

    info!(pool_id, %pool, "pool info");
    Ok(())
}
