use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::model::ObserveMode;

pub const DEFAULT_PLAYER_FILE: &str = "player.txt";
pub const DEFAULT_SUMMONER_LOOKUP: &str = "/lol-summoner/v1/summoners";
pub const DEFAULT_SPECTATE_LAUNCH: &str = "/lol-spectator/v1/spectate/launch";
pub const DEFAULT_READY_TIMEOUT_SECS: u64 = 300;

/// Client API paths used by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub summoner_lookup: String,
    pub spectate_launch: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            summoner_lookup: DEFAULT_SUMMONER_LOOKUP.into(),
            spectate_launch: DEFAULT_SPECTATE_LAUNCH.into(),
        }
    }
}

/// Everything the connector needs for one run.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    pub player_file: PathBuf,
    pub endpoints: Endpoints,
    pub session_hint: String,
    pub queue_hint: String,
    pub observe_mode: ObserveMode,
    /// `None` waits for the client indefinitely.
    pub ready_timeout: Option<Duration>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            player_file: PathBuf::from(DEFAULT_PLAYER_FILE),
            endpoints: Endpoints::default(),
            session_hint: String::new(),
            queue_hint: String::new(),
            observe_mode: ObserveMode::All,
            ready_timeout: Some(Duration::from_secs(DEFAULT_READY_TIMEOUT_SECS)),
        }
    }
}

/// Lockfile watcher settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub lockfile: Option<PathBuf>,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

#[derive(Parser, Debug)]
#[command(name = "spectate")]
#[command(about = "Wait for the local game client and spectate the player named in the identity file")]
pub struct Cli {
    /// File holding the `GameName#Tag` to spectate
    #[arg(long, env = "SPECTATE_PLAYER_FILE", default_value = DEFAULT_PLAYER_FILE)]
    pub player_file: PathBuf,

    /// Client lockfile (defaults to the standard install location)
    #[arg(long, env = "LCU_LOCKFILE")]
    pub lockfile: Option<PathBuf>,

    /// How often to look for the lockfile
    #[arg(long, env = "LCU_POLL_INTERVAL_MS", default_value_t = 1_000)]
    pub poll_interval_ms: u64,

    /// Give up if the client is not ready after this many seconds (0 waits forever)
    #[arg(long, env = "SPECTATE_READY_TIMEOUT_SECS", default_value_t = DEFAULT_READY_TIMEOUT_SECS)]
    pub ready_timeout_secs: u64,

    /// Per-request timeout against the client API
    #[arg(long, env = "LCU_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "SPECTATE_SUMMONER_PATH", default_value = DEFAULT_SUMMONER_LOOKUP)]
    pub summoner_path: String,

    #[arg(long, env = "SPECTATE_LAUNCH_PATH", default_value = DEFAULT_SPECTATE_LAUNCH)]
    pub spectate_path: String,

    /// Sent as `dropInSpectateGameId`
    #[arg(long, env = "SPECTATE_SESSION_HINT", default_value = "")]
    pub session_hint: String,

    /// Sent as `gameQueueType`
    #[arg(long, env = "SPECTATE_QUEUE_HINT", default_value = "")]
    pub queue_hint: String,

    /// ALL, LOBBYONLY or NONE
    #[arg(long, env = "SPECTATE_OBSERVE_MODE", default_value = "ALL")]
    pub observe_mode: ObserveMode,

    /// Tracing filter; falls back to RUST_LOG
    #[arg(long, env = "RUST_LOG", default_value = "info,spectate=debug,lcu_sdk=info")]
    pub log_filter: String,
}

impl Cli {
    pub fn connector_config(&self) -> ConnectorConfig {
        ConnectorConfig {
            player_file: self.player_file.clone(),
            endpoints: Endpoints {
                summoner_lookup: self.summoner_path.clone(),
                spectate_launch: self.spectate_path.clone(),
            },
            session_hint: self.session_hint.clone(),
            queue_hint: self.queue_hint.clone(),
            observe_mode: self.observe_mode,
            ready_timeout: match self.ready_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            lockfile: self.lockfile.clone(),
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
    }
}
