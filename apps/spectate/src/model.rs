use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque account identifier (PUUID). Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObserveMode {
    #[default]
    All,
    LobbyOnly,
    None,
}

impl FromStr for ObserveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(ObserveMode::All),
            "LOBBYONLY" | "LOBBY_ONLY" => Ok(ObserveMode::LobbyOnly),
            "NONE" => Ok(ObserveMode::None),
            other => Err(format!("unknown observe mode '{other}'")),
        }
    }
}

/// Body of the spectate-launch call, in the client's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectateRequest {
    #[serde(rename = "dropInSpectateGameId")]
    pub session_hint: String,
    #[serde(rename = "gameQueueType")]
    pub queue_hint: String,
    #[serde(rename = "allowObserveMode")]
    pub observe_mode: ObserveMode,
    #[serde(rename = "puuid")]
    pub account_id: String,
}

impl SpectateRequest {
    pub fn new(
        account: &AccountId,
        session_hint: impl Into<String>,
        queue_hint: impl Into<String>,
        observe_mode: ObserveMode,
    ) -> Self {
        Self {
            session_hint: session_hint.into(),
            queue_hint: queue_hint.into(),
            observe_mode,
            account_id: account.as_str().to_string(),
        }
    }
}
