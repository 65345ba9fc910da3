use async_trait::async_trait;
use lcu_sdk::LcuConnection;
use serde_json::Value;
use tracing::debug;

use crate::config::Endpoints;
use crate::error::ConnectorError;
use crate::identity::PlayerIdentity;
use crate::model::{AccountId, SpectateRequest};

/// The two client calls the connector needs. Implementations map HTTP
/// statuses onto [`ConnectorError`]; the connector only sequences them.
#[async_trait]
pub trait SpectateApi: Send + Sync {
    async fn resolve(&self, identity: &PlayerIdentity) -> Result<AccountId, ConnectorError>;

    async fn launch_spectate(&self, request: &SpectateRequest) -> Result<(), ConnectorError>;
}

/// [`SpectateApi`] over a live client connection. Owns the connection for
/// one run and drops it with the run.
#[derive(Debug, Clone)]
pub struct LcuSpectateApi {
    connection: LcuConnection,
    endpoints: Endpoints,
}

impl LcuSpectateApi {
    pub fn new(connection: LcuConnection, endpoints: Endpoints) -> Self {
        Self {
            connection,
            endpoints,
        }
    }

    fn lookup_path(&self, identity: &PlayerIdentity) -> String {
        format!(
            "{}?name={}",
            self.endpoints.summoner_lookup,
            identity.url_encoded()
        )
    }
}

#[async_trait]
impl SpectateApi for LcuSpectateApi {
    async fn resolve(&self, identity: &PlayerIdentity) -> Result<AccountId, ConnectorError> {
        let res = self.connection.get(&self.lookup_path(identity)).await?;
        if res.status.as_u16() != 200 {
            debug!(status = res.status.as_u16(), body = %res.text(), "summoner lookup rejected");
            return Err(ConnectorError::ResolutionFailed {
                status: res.status.as_u16(),
            });
        }
        // A 200 with an empty, null or non-object body is a negative answer.
        let lookup: Option<Value> = res.json().ok();
        lookup
            .as_ref()
            .and_then(|body| body.get("puuid"))
            .and_then(Value::as_str)
            .and_then(|id| AccountId::new(id))
            .ok_or(ConnectorError::AccountNotFound)
    }

    async fn launch_spectate(&self, request: &SpectateRequest) -> Result<(), ConnectorError> {
        let res = self
            .connection
            .post(&self.endpoints.spectate_launch, request)
            .await?;
        if res.status.as_u16() != 200 {
            debug!(status = res.status.as_u16(), body = %res.text(), "spectate launch rejected");
            return Err(ConnectorError::LaunchFailed {
                status: res.status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcu_sdk::Credentials;

    #[test]
    fn lookup_path_escapes_tag_separator() {
        let creds: Credentials = "LeagueClient:1:2999:pw:https".parse().unwrap();
        let api = LcuSpectateApi::new(
            LcuConnection::new(&creds).unwrap(),
            Endpoints::default(),
        );
        let identity = PlayerIdentity::new("Hide on bush#KR1").unwrap();
        assert_eq!(
            api.lookup_path(&identity),
            "/lol-summoner/v1/summoners?name=Hide on bush%23KR1"
        );
    }
}
