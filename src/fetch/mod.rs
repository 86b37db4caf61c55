// src/fetch/mod.rs

//! Content fetching.
//!
//! The evaluator depends on the [`Fetcher`] trait; [`HttpFetcher`] is the
//! production implementation on top of `reqwest`. Tests substitute a fake
//! that serves canned bodies.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::errors::{HookwatchError, Result};
use crate::types::BoxFuture;

/// Timeout applied to every outbound request (fetches and hooks).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("hookwatch/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by the fetcher and the hook backend.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| HookwatchError::ConfigError(format!("building HTTP client: {e}")))
}

/// Retrieves the raw body of a resource URL.
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, failing with [`HookwatchError::FetchError`] on transport
    /// errors or non-success statuses.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>>>;
}

/// `GET`s resources over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| HookwatchError::fetch(url, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(HookwatchError::fetch(url, format!("HTTP {status}")));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| HookwatchError::fetch(url, e))?;

            debug!(url = %url, bytes = body.len(), "fetched resource");
            Ok(body.to_vec())
        })
    }
}
