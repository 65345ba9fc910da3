use std::time::Duration;

use tokio::sync::oneshot;

use crate::error::ConnectorError;

/// Creates the single-slot readiness channel between the connection
/// collaborator (notifier) and the connector (signal).
pub fn ready_channel<H>() -> (ReadyNotifier<H>, ReadySignal<H>) {
    let (tx, rx) = oneshot::channel();
    (ReadyNotifier { tx }, ReadySignal { rx })
}

/// Sending half. Consumed by [`notify`](Self::notify), so a run sees at most
/// one readiness event.
#[derive(Debug)]
pub struct ReadyNotifier<H> {
    tx: oneshot::Sender<H>,
}

impl<H> ReadyNotifier<H> {
    /// Delivers the handle. Returns it back if the connector is gone.
    pub fn notify(self, handle: H) -> Result<(), H> {
        self.tx.send(handle)
    }
}

#[derive(Debug)]
pub struct ReadySignal<H> {
    rx: oneshot::Receiver<H>,
}

impl<H> ReadySignal<H> {
    /// Suspends until the handle arrives. `None` waits indefinitely.
    pub async fn wait(self, timeout: Option<Duration>) -> Result<H, ConnectorError> {
        let received = match timeout {
            Some(limit) => tokio::time::timeout(limit, self.rx)
                .await
                .map_err(|_| ConnectorError::Timeout { waited: limit })?,
            None => self.rx.await,
        };
        received.map_err(|_| ConnectorError::ReadinessLost)
    }
}
