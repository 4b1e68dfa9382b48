// src/core/net.rs
// Blocking HTTP over reqwest. One client is shared by every worker thread.

use std::io::Write;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use tracing::debug;
use url::Url;

use crate::config::consts::USER_AGENT;
use crate::error::FetchError;

/// Retrieves one page as text.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Stream a binary body into `out`. Returns the byte count.
    pub fn fetch_to<W: Write + ?Sized>(&self, url: &str, out: &mut W) -> Result<u64, FetchError> {
        let mut resp = self.get(url)?;
        resp.copy_to(out).map_err(|source| FetchError::Transport { url: s!(url), source })
    }

    fn get(&self, url: &str) -> Result<Response, FetchError> {
        let parsed = parse_url(url)?;
        debug!(%url, "GET");
        let resp = self
            .client
            .get(parsed)
            .send()
            .map_err(|source| FetchError::Transport { url: s!(url), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }
        Ok(resp)
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.get(url)?
            .text()
            .map_err(|source| FetchError::Transport { url: s!(url), source })
    }
}

pub fn parse_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|e| FetchError::InvalidUrl { url: s!(url), reason: e.to_string() })
}
