use std::{convert::Infallible, fmt, str::FromStr};

use vex_ledger::{
    config::{parse_account_id, resolve, NetworkConfig},
    error::{ConfigError, SessionError},
    session::{create_session, Session},
    AccountId,
};

use crate::cli::GlobalOptions;

pub const OWNER_KEY_ENV_VAR: &str = "VEX_OWNER_PRIVATE_KEY";
pub const USER_KEY_ENV_VAR: &str = "VEX_USER_PRIVATE_KEY";

/// Private key text as supplied by the operator. Kept out of Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial(String);

impl KeyMaterial {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl FromStr for KeyMaterial {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(<redacted>)")
    }
}

/// Everything a run needs before any session exists: the resolved network and
/// who acts on it.
#[derive(Debug, Clone)]
pub struct HarnessSettings {
    pub config: NetworkConfig,
    pub owner_account: AccountId,
    pub user_account: AccountId,
    owner_key: Option<KeyMaterial>,
    user_key: Option<KeyMaterial>,
}

impl HarnessSettings {
    pub fn from_options(options: &GlobalOptions) -> Result<Self, ConfigError> {
        let mut config = resolve(&options.network)?;
        if let Some(rpc_url) = &options.rpc_url {
            config = config.with_node_url(rpc_url)?;
        }

        let owner_account = match &options.owner_account {
            Some(account) => parse_account_id("owner_account", account)?,
            None => config.owner_account.clone(),
        };
        let user_account = parse_account_id("user_account", &options.user_account)?;

        Ok(Self {
            config,
            owner_account,
            user_account,
            owner_key: options.owner_key.clone(),
            user_key: options.user_key.clone(),
        })
    }

    pub fn owner_session(&self) -> Result<Session, SessionError> {
        let key = self
            .owner_key
            .as_ref()
            .ok_or(ConfigError::MissingField(OWNER_KEY_ENV_VAR))?;
        create_session(&self.config, self.owner_account.as_str(), key.expose())
    }

    pub fn user_session(&self) -> Result<Session, SessionError> {
        let key = self
            .user_key
            .as_ref()
            .ok_or(ConfigError::MissingField(USER_KEY_ENV_VAR))?;
        create_session(&self.config, self.user_account.as_str(), key.expose())
    }
}
