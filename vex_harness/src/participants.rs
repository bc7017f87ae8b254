use std::fmt;

use serde::Serialize;
use vex_ledger::{
    error::{ConfigError, SessionError},
    session::Session,
    AccountId,
};

use crate::settings::{HarnessSettings, USER_KEY_ENV_VAR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => f.write_str("owner"),
            Role::User => f.write_str("user"),
        }
    }
}

/// One ledger actor: an account and the session that signs for it.
#[derive(Debug)]
pub struct Participant {
    pub id: AccountId,
    pub session: Session,
}

impl From<Session> for Participant {
    fn from(session: Session) -> Self {
        Self {
            id: session.account_id().clone(),
            session,
        }
    }
}

/// The actors of one scenario run. The owner always signs; the user only gets
/// a session when the scenario has the user sign something, otherwise just its
/// account id is known.
#[derive(Debug)]
pub struct Participants {
    pub owner: Participant,
    pub user: Option<Participant>,
    pub user_id: AccountId,
}

impl Participants {
    pub fn new(owner: Participant, user: Option<Participant>, user_id: AccountId) -> Self {
        Self {
            owner,
            user,
            user_id,
        }
    }

    /// Build fresh sessions for the given signing roles.
    pub fn for_roles(settings: &HarnessSettings, roles: &[Role]) -> Result<Self, SessionError> {
        let owner = settings.owner_session()?.into();
        let user = if roles.contains(&Role::User) {
            Some(settings.user_session()?.into())
        } else {
            None
        };

        Ok(Self::new(owner, user, settings.user_account.clone()))
    }

    /// The signing user. Absent when the run was set up without the user key.
    pub fn user(&self) -> Result<&Participant, ConfigError> {
        self.user
            .as_ref()
            .ok_or(ConfigError::MissingField(USER_KEY_ENV_VAR))
    }
}
