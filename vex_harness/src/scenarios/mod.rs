//! Scripted scenarios against the VEX contracts.
//!
//! Each scenario issues its operations strictly one after another. The first
//! failing operation ends that scenario; [run_scenario] is the recovery
//! boundary, so a failure is logged and reported but never escapes to the
//! caller or affects other scenarios.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;
use vex_ledger::{
    config::NetworkConfig,
    error::{ConfigError, RemoteCallError},
    AccountId,
};

use crate::participants::{Participants, Role};

mod cover;
mod exchange;
mod mint;
mod pool;
mod stake;
mod status;
mod storage;

pub const DEFAULT_MINT_AMOUNT: &str = "99999999000000000000";
pub const DEFAULT_OWNER_STAKE: &str = "100000000000";
pub const DEFAULT_USER_STAKE: &str = "200000000000";
pub const DEFAULT_COVER_AMOUNT: &str = "10000000000000000000000";
pub const DEFAULT_EXCHANGE_AMOUNT: &str = "20000000000000000000000000";
pub const DEFAULT_POOL_ID: u64 = 1916;

/// Static description of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// roles that sign calls in this scenario
    pub roles: &'static [Role],
}

const STORAGE_DEPOSIT: ScenarioInfo = ScenarioInfo {
    name: "storage-deposit",
    description: "register token storage for the staking contract, the user and the betting contract",
    roles: &[Role::Owner],
};

const MINT: ScenarioInfo = ScenarioInfo {
    name: "mint",
    description: "mint VEX and read the recipient's balance",
    roles: &[Role::Owner],
};

const STAKE: ScenarioInfo = ScenarioInfo {
    name: "stake",
    description: "stake VEX from owner and user, then compare their stake records",
    roles: &[Role::Owner, Role::User],
};

const COVER: ScenarioInfo = ScenarioInfo {
    name: "cover",
    description: "cover USDC on the staking contract and compare vex_out",
    roles: &[Role::Owner],
};

const EXCHANGE: ScenarioInfo = ScenarioInfo {
    name: "exchange",
    description: "send USDC to the staking contract and compare reserves",
    roles: &[Role::Owner],
};

const POOL_INFO: ScenarioInfo = ScenarioInfo {
    name: "pool-info",
    description: "show a Ref Finance pool",
    roles: &[Role::Owner],
};

const STATUS: ScenarioInfo = ScenarioInfo {
    name: "status",
    description: "show the staking contract's VEX balance",
    roles: &[Role::Owner],
};

/// Dispatch table: every scenario the harness can run.
pub const SCENARIOS: &[ScenarioInfo] = &[
    STORAGE_DEPOSIT,
    MINT,
    STAKE,
    COVER,
    EXCHANGE,
    POOL_INFO,
    STATUS,
];

pub fn find_scenario(name: &str) -> Option<&'static ScenarioInfo> {
    SCENARIOS.iter().find(|info| info.name == name)
}

/// A scenario together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scenario {
    StorageDeposit,
    Mint {
        amount: String,
        /// defaults to the owner
        recipient: Option<AccountId>,
    },
    Stake {
        owner_amount: String,
        user_amount: String,
    },
    Cover {
        amount: String,
    },
    Exchange {
        amount: String,
    },
    PoolInfo {
        pool_id: u64,
    },
    Status,
}

impl Scenario {
    pub fn info(&self) -> &'static ScenarioInfo {
        match self {
            Scenario::StorageDeposit => &STORAGE_DEPOSIT,
            Scenario::Mint { .. } => &MINT,
            Scenario::Stake { .. } => &STAKE,
            Scenario::Cover { .. } => &COVER,
            Scenario::Exchange { .. } => &EXCHANGE,
            Scenario::PoolInfo { .. } => &POOL_INFO,
            Scenario::Status => &STATUS,
        }
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    async fn run(&self, ctx: &ScenarioContext<'_>, steps: &mut Steps) -> Result<(), ScenarioFailure> {
        match self {
            Scenario::StorageDeposit => storage::run(ctx, steps).await,
            Scenario::Mint { amount, recipient } => {
                mint::run(ctx, steps, amount, recipient.as_ref()).await
            }
            Scenario::Stake {
                owner_amount,
                user_amount,
            } => stake::run(ctx, steps, owner_amount, user_amount).await,
            Scenario::Cover { amount } => cover::run(ctx, steps, amount).await,
            Scenario::Exchange { amount } => exchange::run(ctx, steps, amount).await,
            Scenario::PoolInfo { pool_id } => pool::run(ctx, steps, *pool_id).await,
            Scenario::Status => status::run(ctx, steps).await,
        }
    }
}

/// What a scenario gets to work with.
pub struct ScenarioContext<'a> {
    pub config: &'a NetworkConfig,
    pub participants: &'a Participants,
}

impl<'a> ScenarioContext<'a> {
    pub fn new(config: &'a NetworkConfig, participants: &'a Participants) -> Self {
        Self {
            config,
            participants,
        }
    }
}

/// Why a scenario stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioFailure {
    pub operation: String,
    pub message: String,
}

impl ScenarioFailure {
    fn remote(operation: &str, error: &RemoteCallError) -> Self {
        Self {
            operation: operation.to_owned(),
            message: error.to_string(),
        }
    }

    fn setup(role: Role, error: &ConfigError) -> Self {
        Self {
            operation: format!("{role} session"),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Ok { response: Value },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub operation: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Records each operation's outcome as it completes.
#[derive(Debug, Default)]
pub struct Steps {
    records: Vec<StepRecord>,
}

impl Steps {
    /// Await one operation. A failure is recorded and handed back as a
    /// [ScenarioFailure] so the scenario can bail out with `?`.
    pub async fn record<F>(&mut self, operation: &str, op: F) -> Result<Value, ScenarioFailure>
    where
        F: Future<Output = Result<Value, RemoteCallError>>,
    {
        match op.await {
            Ok(response) => {
                info!(operation, %response, "ok");
                self.records.push(StepRecord {
                    operation: operation.to_owned(),
                    outcome: StepOutcome::Ok {
                        response: response.clone(),
                    },
                });
                Ok(response)
            }
            Err(e) => {
                self.records.push(StepRecord {
                    operation: operation.to_owned(),
                    outcome: StepOutcome::Failed {
                        error: e.to_string(),
                    },
                });
                Err(ScenarioFailure::remote(operation, &e))
            }
        }
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioStatus {
    Completed,
    Aborted { operation: String, error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: &'static str,
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepRecord>,
    #[serde(flatten)]
    pub status: ScenarioStatus,
}

impl ScenarioReport {
    pub fn is_completed(&self) -> bool {
        self.status == ScenarioStatus::Completed
    }
}

/// Run one scenario to completion or to its first failure. Never fails and
/// never retries: the outcome is in the report and in the logs.
pub async fn run_scenario(scenario: &Scenario, ctx: &ScenarioContext<'_>) -> ScenarioReport {
    let name = scenario.name();
    let run_id = Uuid::new_v4();
    let span = info_span!("scenario", scenario = name, %run_id);

    async move {
        let started_at = Utc::now();
        info!("starting");

        let mut steps = Steps::default();
        let status = match scenario.run(ctx, &mut steps).await {
            Ok(()) => {
                info!(steps = steps.records().len(), "done");
                ScenarioStatus::Completed
            }
            Err(failure) => {
                error!(
                    operation = %failure.operation,
                    error = %failure.message,
                    "{name} error"
                );
                ScenarioStatus::Aborted {
                    operation: failure.operation,
                    error: failure.message,
                }
            }
        };

        ScenarioReport {
            scenario: name,
            run_id,
            started_at,
            finished_at: Utc::now(),
            steps: steps.records,
            status,
        }
    }
    .instrument(span)
    .await
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::sync::Arc;

    use vex_ledger::{config::resolve, session::Session, testing::MockLedger};

    use crate::participants::{Participant, Participants};

    pub struct Fixture {
        pub config: vex_ledger::config::NetworkConfig,
        pub owner_ledger: Arc<MockLedger>,
        pub user_ledger: Arc<MockLedger>,
        pub participants: Participants,
    }

    /// Owner and user bound to separate mock ledgers.
    pub fn fixture() -> Fixture {
        let config = resolve("testnet").unwrap();
        let owner_ledger = Arc::new(MockLedger::new());
        let user_ledger = Arc::new(MockLedger::new());

        let owner = Session::with_ledger(&config, config.owner_account.clone(), owner_ledger.clone());
        let user_id: vex_ledger::AccountId = "viernear.testnet".parse().unwrap();
        let user = Session::with_ledger(&config, user_id.clone(), user_ledger.clone());

        let participants = Participants::new(
            Participant::from(owner),
            Some(Participant::from(user)),
            user_id,
        );

        Fixture {
            config,
            owner_ledger,
            user_ledger,
            participants,
        }
    }
}
