use std::fmt;

use tracing::{debug, info, warn};

use crate::api::SpectateApi;
use crate::config::ConnectorConfig;
use crate::error::ConnectorError;
use crate::identity::PlayerIdentity;
use crate::model::{AccountId, SpectateRequest};
use crate::readiness::ReadySignal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { account: AccountId },
    Failure(ConnectorError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn failure(&self) -> Option<&ConnectorError> {
        match self {
            Outcome::Failure(err) => Some(err),
            Outcome::Success { .. } => None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorState {
    Idle,
    AwaitingReady,
    ResolvingIdentity,
    LaunchingSpectate,
    Completed(Outcome),
}

impl ConnectorState {
    fn name(&self) -> &'static str {
        match self {
            ConnectorState::Idle => "idle",
            ConnectorState::AwaitingReady => "awaiting_ready",
            ConnectorState::ResolvingIdentity => "resolving_identity",
            ConnectorState::LaunchingSpectate => "launching_spectate",
            ConnectorState::Completed(Outcome::Success { .. }) => "completed_success",
            ConnectorState::Completed(Outcome::Failure(_)) => "completed_failure",
        }
    }
}

type ResolvedHook = Box<dyn FnMut(&AccountId) + Send>;

/// Forward-only chain: wait for the client, resolve the player, launch
/// spectate. Handles exactly one readiness event.
pub struct SpectateConnector {
    config: ConnectorConfig,
    state: ConnectorState,
    history: Vec<ConnectorState>,
    account: Option<AccountId>,
    on_resolved: Option<ResolvedHook>,
}

impl fmt::Debug for SpectateConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectateConnector")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("history", &self.history)
            .field("account", &self.account)
            .field("on_resolved", &self.on_resolved.is_some())
            .finish()
    }
}

impl SpectateConnector {
    pub fn new(config: ConnectorConfig) -> Self {
        Self {
            config,
            state: ConnectorState::Idle,
            history: vec![ConnectorState::Idle],
            account: None,
            on_resolved: None,
        }
    }

    /// Called once with the account id as soon as resolution succeeds,
    /// before the launch request goes out.
    pub fn on_resolved<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&AccountId) + Send + 'static,
    {
        self.on_resolved = Some(Box::new(hook));
        self
    }

    pub fn state(&self) -> &ConnectorState {
        &self.state
    }

    /// Every state entered so far, starting with `Idle`.
    pub fn history(&self) -> &[ConnectorState] {
        &self.history
    }

    /// Account id from a successful resolution, even if the launch later failed.
    pub fn resolved_account(&self) -> Option<&AccountId> {
        self.account.as_ref()
    }

    /// Drives one run to completion. `bind` turns the delivered connection
    /// handle into the API the two calls go through; the API (and the handle
    /// it owns) is dropped when the run ends.
    ///
    /// Calling `run` on a connector that has already completed returns the
    /// previous outcome without touching `ready`.
    ///
    /// Not cancel-safe: if the future is dropped mid-run, the connector is
    /// left in an intermediate state and the next call completes it with
    /// [`ConnectorError::Interrupted`] naming that state.
    pub async fn run<H, A, F>(&mut self, ready: ReadySignal<H>, bind: F) -> Outcome
    where
        F: FnOnce(H) -> A,
        A: SpectateApi,
    {
        let interrupted = match &self.state {
            ConnectorState::Idle => None,
            ConnectorState::Completed(outcome) => return outcome.clone(),
            other => Some(other.name()),
        };
        if let Some(state) = interrupted {
            warn!(state, "connector run re-entered after an interrupted run");
            return self.complete(Outcome::Failure(ConnectorError::Interrupted { state }));
        }

        self.enter(ConnectorState::AwaitingReady);
        debug!(timeout = ?self.config.ready_timeout, "waiting for client readiness");
        let handle = match ready.wait(self.config.ready_timeout).await {
            Ok(handle) => handle,
            Err(err) => return self.complete(Outcome::Failure(err)),
        };
        let api = bind(handle);

        self.enter(ConnectorState::ResolvingIdentity);
        let identity = match PlayerIdentity::load(&self.config.player_file).await {
            Ok(identity) => identity,
            Err(err) => return self.complete(Outcome::Failure(err)),
        };
        info!(player = %identity, encoded = %identity.url_encoded(), "resolving player");
        let account = match api.resolve(&identity).await {
            Ok(account) => account,
            Err(err) => return self.complete(Outcome::Failure(err)),
        };
        info!(puuid = %account, "player resolved");
        self.account = Some(account.clone());
        if let Some(hook) = self.on_resolved.as_mut() {
            hook(&account);
        }

        self.enter(ConnectorState::LaunchingSpectate);
        let request = SpectateRequest::new(
            &account,
            self.config.session_hint.clone(),
            self.config.queue_hint.clone(),
            self.config.observe_mode,
        );
        match api.launch_spectate(&request).await {
            Ok(()) => self.complete(Outcome::Success { account }),
            Err(err) => self.complete(Outcome::Failure(err)),
        }
    }

    fn enter(&mut self, next: ConnectorState) {
        debug!(from = self.state.name(), to = next.name(), "connector transition");
        self.history.push(next.clone());
        self.state = next;
    }

    fn complete(&mut self, outcome: Outcome) -> Outcome {
        match &outcome {
            Outcome::Success { account } => info!(puuid = %account, "spectate launched"),
            Outcome::Failure(err) => warn!(error = %err, "spectate run failed"),
        }
        self.enter(ConnectorState::Completed(outcome.clone()));
        outcome
    }
}
