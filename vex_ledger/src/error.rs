use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Problems resolving the network environment. Always fatal, and always raised
/// before any session exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown network '{0}' (supported: testnet)")]
    UnknownNetwork(String),
    #[error("missing required setting: {0}")]
    MissingField(&'static str),
    #[error("invalid url for {field}: '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid account id for {field}: '{value}': {reason}")]
    InvalidAccountId {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid gas budget '{0}'")]
    InvalidGas(String),
}

/// Key material that could not be parsed. Only the account is reported, never
/// the key itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed key material for {account_id}: {reason}")]
pub struct KeyFormatError {
    pub account_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    View,
    Call,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallKind::View => f.write_str("view"),
            CallKind::Call => f.write_str("call"),
        }
    }
}

/// Any failure returned by or raised during a query/call against the ledger:
/// authorization, contract panics, reachability, undecodable results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} {contract_id}.{method} failed: {message}")]
pub struct RemoteCallError {
    pub kind: CallKind,
    pub contract_id: String,
    pub method: String,
    pub message: String,
}

impl RemoteCallError {
    pub fn new(
        kind: CallKind,
        contract_id: impl ToString,
        method: &str,
        message: impl ToString,
    ) -> Self {
        Self {
            kind,
            contract_id: contract_id.to_string(),
            method: method.to_owned(),
            message: message.to_string(),
        }
    }
}

/// Failure building a session. Aborts the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    KeyFormat(#[from] KeyFormatError),
}
