use std::{fmt, str::FromStr};

use near_api::{AccountId, NearGas, RPCEndpoint};
use serde::Serialize;
use url::Url;

use crate::error::ConfigError;

const TESTNET_NETWORK_ID: &str = "testnet";
const TESTNET_NODE_URL: &str = "https://rpc.testnet.near.org";
const TESTNET_WALLET_URL: &str = "https://wallet.testnet.near.org";
const TESTNET_HELPER_URL: &str = "https://helper.testnet.near.org";
const TESTNET_EXPLORER_URL: &str = "https://explorer.testnet.near.org";

/// Fixed compute budget attached to every state-changing call (300 Tgas).
const TESTNET_GAS: &str = "300000000000000";

const TESTNET_STAKING_CONTRACT: &str = "stake.vex-betting.testnet";
const TESTNET_BETTING_CONTRACT: &str = "betting.vex-betting.testnet";
const TESTNET_OWNER_ACCOUNT: &str = "vier1near.testnet";
const TESTNET_VEX_TOKEN: &str = "vex.vex-betting.testnet";
const TESTNET_USDC_TOKEN: &str = "cusd.fakes.testnet";
const TESTNET_REF_EXCHANGE: &str = "ref-finance-101.testnet";

/// Closed set of networks the harness knows how to talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    Testnet,
}

impl Network {
    pub const ALL: &'static [Network] = &[Network::Testnet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Testnet => TESTNET_NETWORK_ID,
        }
    }

    pub fn config(&self) -> Result<NetworkConfig, ConfigError> {
        match self {
            Network::Testnet => Ok(NetworkConfig {
                network_id: TESTNET_NETWORK_ID.to_owned(),
                node_url: parse_url("node_url", TESTNET_NODE_URL)?,
                wallet_url: parse_url("wallet_url", TESTNET_WALLET_URL)?,
                helper_url: parse_url("helper_url", TESTNET_HELPER_URL)?,
                explorer_url: parse_url("explorer_url", TESTNET_EXPLORER_URL)?,
                gas: TESTNET_GAS.to_owned(),
                gas_max: TESTNET_GAS.to_owned(),
                gas_budget: parse_gas(TESTNET_GAS)?,
                staking_contract: parse_account_id("staking_contract", TESTNET_STAKING_CONTRACT)?,
                betting_contract: parse_account_id("betting_contract", TESTNET_BETTING_CONTRACT)?,
                owner_account: parse_account_id("owner_account", TESTNET_OWNER_ACCOUNT)?,
                vex_token: parse_account_id("vex_token", TESTNET_VEX_TOKEN)?,
                usdc_token: parse_account_id("usdc_token", TESTNET_USDC_TOKEN)?,
                ref_exchange: parse_account_id("ref_exchange", TESTNET_REF_EXCHANGE)?,
            }),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .iter()
            .copied()
            .find(|network| network.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownNetwork(s.to_owned()))
    }
}

/// Endpoints, gas parameters and well-known accounts of one network.
/// Built once per run and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkConfig {
    pub network_id: String,
    pub node_url: Url,
    pub wallet_url: Url,
    pub helper_url: Url,
    pub explorer_url: Url,
    pub gas: String,
    pub gas_max: String,
    pub staking_contract: AccountId,
    pub betting_contract: AccountId,
    pub owner_account: AccountId,
    pub vex_token: AccountId,
    pub usdc_token: AccountId,
    pub ref_exchange: AccountId,
    #[serde(skip)]
    gas_budget: NearGas,
}

/// Resolve a network name to its configuration. Names outside the supported
/// set are rejected rather than yielding a partially filled config.
pub fn resolve(network_name: &str) -> Result<NetworkConfig, ConfigError> {
    network_name.parse::<Network>()?.config()
}

impl NetworkConfig {
    pub fn gas_budget(&self) -> NearGas {
        self.gas_budget
    }

    /// Same network, different RPC node.
    pub fn with_node_url(&self, node_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            node_url: parse_url("node_url", node_url)?,
            ..self.clone()
        })
    }

    /// SDK view of this network. No I/O happens until a request is sent.
    pub fn near_network(&self) -> near_api::NetworkConfig {
        near_api::NetworkConfig {
            network_name: self.network_id.clone(),
            rpc_endpoints: vec![RPCEndpoint::new(self.node_url.clone())],
            ..near_api::NetworkConfig::testnet()
        }
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField(field));
    }
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        value: value.to_owned(),
        reason: e.to_string(),
    })
}

fn parse_gas(value: &str) -> Result<NearGas, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|gas| *gas > 0)
        .map(NearGas::from_gas)
        .ok_or_else(|| ConfigError::InvalidGas(value.to_owned()))
}

pub fn parse_account_id(field: &'static str, value: &str) -> Result<AccountId, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField(field));
    }
    value
        .parse::<AccountId>()
        .map_err(|e| ConfigError::InvalidAccountId {
            field,
            value: value.to_owned(),
            reason: e.to_string(),
        })
}
