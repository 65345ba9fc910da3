//! Asynchronous client for the local game-client API (LCU).
//!
//! The client exposes an HTTPS API on an ephemeral loopback port once it is
//! up, and announces the port and a per-session password through its
//! `lockfile`. This crate reads that lockfile, builds an authenticated
//! connection from it and hands the connection to whoever is waiting for it.

pub mod lockfile;
pub mod watcher;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub use lockfile::Credentials;
pub use watcher::LockfileWatcher;

/// Basic-auth user the local client expects; the password comes from the lockfile.
pub const LCU_USER: &str = "riot";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum LcuError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lockfile: {0}")]
    Lockfile(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    Url(String),
}

/// Ready connection to a running client. Cheap to clone.
#[derive(Clone)]
pub struct LcuConnection {
    http: Client,
    base_url: Url,
    password: String,
}

impl std::fmt::Debug for LcuConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LcuConnection")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Status and raw body of one API call. Non-2xx statuses are not errors here;
/// callers decide what a status means.
#[derive(Debug, Clone)]
pub struct LcuResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl LcuResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, LcuError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl LcuConnection {
    pub fn new(credentials: &Credentials) -> Result<Self, LcuError> {
        Self::with_timeout(credentials, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(credentials: &Credentials, timeout: Duration) -> Result<Self, LcuError> {
        let base_url = credentials.base_url()?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        // The client serves a self-signed certificate on loopback.
        let http = Client::builder()
            .danger_accept_invalid_certs(true)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url,
            password: credentials.password.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path_and_query: &str) -> Result<Url, LcuError> {
        self.base_url
            .join(path_and_query)
            .map_err(|err| LcuError::Url(format!("invalid api path '{path_and_query}': {err}")))
    }

    pub async fn get(&self, path_and_query: &str) -> Result<LcuResponse, LcuError> {
        self.request::<()>(Method::GET, path_and_query, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<LcuResponse, LcuError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<&B>,
    ) -> Result<LcuResponse, LcuError> {
        let url = self.url(path_and_query)?;
        debug!(%method, url = %url, "lcu request");
        let mut builder = self
            .http
            .request(method, url)
            .basic_auth(LCU_USER, Some(&self.password));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let res = builder.send().await?;
        let status = res.status();
        let body = res.bytes().await?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "lcu response");
        Ok(LcuResponse { status, body })
    }
}
