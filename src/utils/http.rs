use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::Proxy;
use thiserror::Error;

use crate::settings::Settings;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to set proxy: {0}")]
    Proxy(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Failed to send request: {0}")]
    Request(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Upstream proxy used for ruleset downloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyConfig {
    /// Follow `HTTP_PROXY`/`HTTPS_PROXY`/`ALL_PROXY` from the environment
    Environment,
    /// Connect directly, ignoring the environment
    Direct,
    /// Route every request through the given proxy URL
    Custom(String),
}

pub fn parse_proxy(proxy_str: &str) -> ProxyConfig {
    match proxy_str.trim() {
        "" | "SYSTEM" => ProxyConfig::Environment,
        "NONE" => ProxyConfig::Direct,
        other => ProxyConfig::Custom(other.to_string()),
    }
}

/// Source of remote text documents
///
/// The generator only ever needs the body of a GET request, so tests can swap
/// the network out for canned responses.
pub trait RulesetFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher with a fixed timeout and user agent
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build the client once for the whole run
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let mut client_builder = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone());

        match parse_proxy(&settings.proxy_ruleset) {
            ProxyConfig::Environment => {}
            ProxyConfig::Direct => client_builder = client_builder.no_proxy(),
            ProxyConfig::Custom(proxy) => {
                let proxy = Proxy::all(&proxy).map_err(|e| FetchError::Proxy(e.to_string()))?;
                client_builder = client_builder.proxy(proxy);
            }
        }

        let client = client_builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(HttpFetcher { client })
    }
}

impl RulesetFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        // Anything outside 2xx counts as a failed download
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().map_err(|e| FetchError::Body(e.to_string()))
    }
}

/// Check whether a source is fetched over HTTP(S)
pub fn is_http_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
