use std::path::PathBuf;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::lockfile::Credentials;
use crate::{LcuConnection, LcuError, DEFAULT_REQUEST_TIMEOUT};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Waits for the client to publish its lockfile and turns it into a ready
/// [`LcuConnection`].
#[derive(Debug, Clone)]
pub struct LockfileWatcher {
    path: PathBuf,
    poll_interval: Duration,
    request_timeout: Duration,
}

impl LockfileWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Default lockfile location of a standard client install.
    pub fn default_path() -> PathBuf {
        if cfg!(target_os = "windows") {
            PathBuf::from(r"C:\Riot Games\League of Legends\lockfile")
        } else if cfg!(target_os = "macos") {
            PathBuf::from("/Applications/League of Legends.app/Contents/LoL/lockfile")
        } else {
            PathBuf::from("lockfile")
        }
    }

    /// Polls until the lockfile exists and parses. A missing or half-written
    /// file is retried on the next tick; only a connection that cannot be
    /// built at all is returned as an error.
    pub async fn wait_ready(&self) -> Result<LcuConnection, LcuError> {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match Credentials::read(&self.path).await {
                Ok(credentials) => {
                    info!(
                        process = %credentials.process,
                        pid = credentials.pid,
                        port = credentials.port,
                        "client lockfile found"
                    );
                    return LcuConnection::with_timeout(&credentials, self.request_timeout);
                }
                Err(LcuError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                    debug!(path = %self.path.display(), "lockfile not present yet");
                }
                Err(err) => {
                    debug!(path = %self.path.display(), error = %err, "lockfile not usable yet");
                }
            }
        }
    }

    /// Runs [`wait_ready`](Self::wait_ready) in the background and hands the
    /// connection to `on_ready` exactly once. If the connection cannot be
    /// built, `on_ready` is dropped without being called.
    pub fn spawn<F>(self, on_ready: F) -> JoinHandle<()>
    where
        F: FnOnce(LcuConnection) + Send + 'static,
    {
        tokio::spawn(async move {
            match self.wait_ready().await {
                Ok(connection) => on_ready(connection),
                Err(err) => {
                    error!(path = %self.path.display(), error = %err, "failed to connect to client");
                }
            }
        })
    }
}
