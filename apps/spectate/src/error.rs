use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Reasons a run ends in `Completed(Failure)`. None of them are retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("player identity unavailable at {path}: {reason}")]
    IdentityUnavailable { path: PathBuf, reason: String },
    #[error("identity resolution failed with status code {status}")]
    ResolutionFailed { status: u16 },
    #[error("PUUID not found")]
    AccountNotFound,
    #[error("spectate request failed with status code {status}")]
    LaunchFailed { status: u16 },
    #[error("client did not become ready within {waited:?}")]
    Timeout { waited: Duration },
    #[error("readiness notifier dropped before the client became ready")]
    ReadinessLost,
    #[error("previous run was dropped while {state}")]
    Interrupted { state: &'static str },
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<lcu_sdk::LcuError> for ConnectorError {
    fn from(value: lcu_sdk::LcuError) -> Self {
        ConnectorError::Transport(value.to_string())
    }
}
