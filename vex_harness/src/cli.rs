use clap::{Args, Parser, Subcommand};
use vex_ledger::AccountId;

use crate::{
    scenarios::{
        Scenario, DEFAULT_COVER_AMOUNT, DEFAULT_EXCHANGE_AMOUNT, DEFAULT_MINT_AMOUNT,
        DEFAULT_OWNER_STAKE, DEFAULT_POOL_ID, DEFAULT_USER_STAKE,
    },
    settings::KeyMaterial,
};

pub const DEFAULT_USER_ACCOUNT: &str = "viernear.testnet";

/// Run scripted scenarios against the VEX contracts on a NEAR network.
///
/// Secrets are read from the environment (or a `.env` file), never from
/// source.
#[derive(Parser, Debug)]
#[command(name = "vex-harness", version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Network to run against
    #[arg(long, global = true, env = "VEX_NETWORK", default_value = "testnet")]
    pub network: String,

    /// Override the network's RPC endpoint
    #[arg(long, global = true, env = "VEX_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Owner account (defaults to the network's owner)
    #[arg(long, global = true, env = "VEX_OWNER_ACCOUNT")]
    pub owner_account: Option<String>,

    /// Secondary participant
    #[arg(long, global = true, env = "VEX_USER_ACCOUNT", default_value = DEFAULT_USER_ACCOUNT)]
    pub user_account: String,

    /// Owner private key, e.g. "ed25519:..."
    #[arg(long, global = true, env = "VEX_OWNER_PRIVATE_KEY", hide_env_values = true)]
    pub owner_key: Option<KeyMaterial>,

    /// Secondary participant private key
    #[arg(long, global = true, env = "VEX_USER_PRIVATE_KEY", hide_env_values = true)]
    pub user_key: Option<KeyMaterial>,

    /// Print the scenario report as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register storage on the VEX and USDC tokens for the staking contract,
    /// the user and the betting contract
    StorageDeposit,
    /// Mint VEX
    Mint {
        /// Amount in the token's smallest unit
        #[arg(long, default_value = DEFAULT_MINT_AMOUNT, value_parser = parse_amount)]
        amount: String,
        /// Recipient (defaults to the owner)
        #[arg(long)]
        to: Option<AccountId>,
    },
    /// Stake VEX from both owner and user, then compare stake records
    Stake {
        #[arg(long, default_value = DEFAULT_OWNER_STAKE, value_parser = parse_amount)]
        owner_amount: String,
        #[arg(long, default_value = DEFAULT_USER_STAKE, value_parser = parse_amount)]
        user_amount: String,
    },
    /// Cover USDC on the staking contract and compare vex_out before and after
    Cover {
        #[arg(long, default_value = DEFAULT_COVER_AMOUNT, value_parser = parse_amount)]
        amount: String,
    },
    /// Send USDC to the staking contract and compare reserves before and after
    Exchange {
        #[arg(long, default_value = DEFAULT_EXCHANGE_AMOUNT, value_parser = parse_amount)]
        amount: String,
    },
    /// Show a Ref Finance pool
    PoolInfo {
        #[arg(long, default_value_t = DEFAULT_POOL_ID)]
        pool_id: u64,
    },
    /// Show the staking contract's VEX balance
    Status,
    /// List available scenarios, or describe one
    List {
        /// Scenario to describe
        name: Option<String>,
    },
    /// Print the resolved network configuration
    Config,
}

impl Command {
    /// `None` for commands that do not run a scenario.
    pub fn scenario(&self) -> Option<Scenario> {
        let scenario = match self {
            Command::StorageDeposit => Scenario::StorageDeposit,
            Command::Mint { amount, to } => Scenario::Mint {
                amount: amount.clone(),
                recipient: to.clone(),
            },
            Command::Stake {
                owner_amount,
                user_amount,
            } => Scenario::Stake {
                owner_amount: owner_amount.clone(),
                user_amount: user_amount.clone(),
            },
            Command::Cover { amount } => Scenario::Cover {
                amount: amount.clone(),
            },
            Command::Exchange { amount } => Scenario::Exchange {
                amount: amount.clone(),
            },
            Command::PoolInfo { pool_id } => Scenario::PoolInfo { pool_id: *pool_id },
            Command::Status => Scenario::Status,
            Command::List { .. } | Command::Config => return None,
        };
        Some(scenario)
    }
}

/// Token amounts travel as decimal strings of a u128.
fn parse_amount(s: &str) -> Result<String, String> {
    s.parse::<u128>()
        .map(|amount| amount.to_string())
        .map_err(|e| format!("'{s}' is not a token amount: {e}"))
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scenario_defaults() {
        let cli = Cli::try_parse_from(["vex-harness", "mint"]).unwrap();
        assert_eq!(
            cli.command.scenario(),
            Some(Scenario::Mint {
                amount: "99999999000000000000".to_owned(),
                recipient: None
            })
        );
        assert_eq!(cli.global.network, "testnet");
        assert!(!cli.global.json);

        let cli = Cli::try_parse_from(["vex-harness", "pool-info"]).unwrap();
        assert_eq!(
            cli.command.scenario(),
            Some(Scenario::PoolInfo { pool_id: 1916 })
        );
    }

    #[test]
    fn every_scenario_has_a_subcommand() {
        for info in crate::scenarios::SCENARIOS {
            let cli = Cli::try_parse_from(["vex-harness", info.name]).unwrap();
            assert_eq!(cli.command.scenario().unwrap().info().name, info.name);
        }
    }

    #[test]
    fn non_scenario_commands() {
        for name in ["list", "config"] {
            let cli = Cli::try_parse_from(["vex-harness", name]).unwrap();
            assert_eq!(cli.command.scenario(), None);
        }
    }

    #[test]
    fn list_takes_an_optional_scenario_name() {
        let cli = Cli::try_parse_from(["vex-harness", "list"]).unwrap();
        assert_eq!(cli.command, Command::List { name: None });

        let cli = Cli::try_parse_from(["vex-harness", "list", "stake"]).unwrap();
        assert_eq!(
            cli.command,
            Command::List {
                name: Some("stake".to_owned())
            }
        );
    }

    #[test]
    fn mint_recipient_must_be_an_account_id() {
        assert!(Cli::try_parse_from(["vex-harness", "mint", "--to", "Not An Account"]).is_err());

        let cli = Cli::try_parse_from(["vex-harness", "mint", "--to", "bob.testnet"]).unwrap();
        assert_eq!(
            cli.command.scenario(),
            Some(Scenario::Mint {
                amount: DEFAULT_MINT_AMOUNT.to_owned(),
                recipient: Some("bob.testnet".parse().unwrap()),
            })
        );
    }

    #[test]
    fn amounts_must_be_integers() {
        assert!(Cli::try_parse_from(["vex-harness", "cover", "--amount", "1.5"]).is_err());
        assert!(Cli::try_parse_from(["vex-harness", "cover", "--amount", "-1"]).is_err());

        let cli = Cli::try_parse_from(["vex-harness", "cover", "--amount", "007"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Cover {
                amount: "7".to_owned()
            }
        );
    }

    #[test]
    fn key_values_are_not_debug_printed() {
        let cli = Cli::try_parse_from([
            "vex-harness",
            "--owner-key",
            "ed25519:supersecret",
            "status",
        ])
        .unwrap();

        assert!(!format!("{cli:?}").contains("supersecret"));
    }
}
