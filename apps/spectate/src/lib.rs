//! One-shot spectate automation for the local game client.
//!
//! Waits for the client to become reachable, resolves the player named in the
//! identity file to an account id, and asks the client to spectate that
//! account's game.

pub mod api;
pub mod config;
pub mod connector;
pub mod error;
pub mod identity;
pub mod model;
pub mod readiness;
pub mod telemetry;

pub use api::{LcuSpectateApi, SpectateApi};
pub use config::{ConnectorConfig, Endpoints};
pub use connector::{ConnectorState, Outcome, SpectateConnector};
pub use error::ConnectorError;
pub use identity::{PlayerIdentity, encode_identity};
pub use model::{AccountId, ObserveMode, SpectateRequest};
pub use readiness::{ReadyNotifier, ReadySignal, ready_channel};
