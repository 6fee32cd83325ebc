use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, ACCEPT, USER_AGENT};
use reqwest::Client;
use thiserror::Error;

use crate::constants::{SUB_INFO_HEADER, SUB_INFO_HEADER_ALIASES};

/// Timeout for the subscription request in seconds
const DEFAULT_TIMEOUT: u64 = 20;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Connection failed, check the URL and the network: {0}")]
    Connection(String),

    #[error("Server did not answer within 20 seconds")]
    Timeout,

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else if e.is_body() || e.is_decode() {
            FetchError::Body(e.to_string())
        } else if e.is_builder() {
            FetchError::Client(e.to_string())
        } else {
            FetchError::Connection(e.to_string())
        }
    }
}

/// A downloaded subscription document
#[derive(Debug, Clone)]
pub struct FetchedSubscription {
    pub body: String,
    /// Raw subscription metadata header, empty when the provider sent none
    pub userinfo: String,
}

/// Downloads the subscription document at `url`
///
/// # Arguments
/// * `url` - The URL to request, already passed through
///   [`prepare_url`](crate::utils::url::prepare_url)
///
/// # Returns
/// * `Ok(FetchedSubscription)` - The body and the metadata header
/// * `Err(FetchError)` - The failure category
pub async fn fetch_subscription(url: &str) -> Result<FetchedSubscription, FetchError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT))
        .build()?;

    let response = client
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .header(ACCEPT, BROWSER_ACCEPT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let userinfo = sub_info_from_headers(response.headers());
    debug!("Subscription metadata header: {:?}", userinfo);

    let body = response.text().await?;
    Ok(FetchedSubscription { body, userinfo })
}

/// Extracts the raw subscription metadata header
///
/// The standard header wins; otherwise the first non-empty alias is used.
pub fn sub_info_from_headers(headers: &HeaderMap) -> String {
    std::iter::once(SUB_INFO_HEADER)
        .chain(SUB_INFO_HEADER_ALIASES)
        .filter_map(|name| headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}
