//! HTTP client for the upstream contribution API.

use crate::{error::SourceError, series::DailySeries, source::ContributionSource};
use async_trait::async_trait;
use cc_utils::dates::parse_date;
use log::{info, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Placeholder replaced by the identity in [`HttpSourceConfig::url_template`].
pub const IDENTITY_PLACEHOLDER: &str = "{identity}";

/// Everything but RFC 3986 unreserved characters is escaped, so an identity
/// always lands in the template as one opaque path segment.
const IDENTITY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Default upstream: one year of daily counts per GitHub account.
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://github-contributions-api.jogruber.de/v4/{identity}?y=last";

#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub url_template: String,
    pub max_tries: u32,
    /// Delay before the first retry; doubled after every failed attempt.
    pub backoff: Duration,
    pub timeout: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            max_tries: 3,
            backoff: Duration::from_millis(1000),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContributionsPayload {
    contributions: Vec<ContributionDay>,
}

#[derive(Debug, Deserialize)]
struct ContributionDay {
    date: String,
    count: u64,
}

/// Parse an upstream body of the form
/// `{"contributions": [{"date": "YYYY-MM-DD", "count": n, ...}, ...]}`.
///
/// Extra fields are ignored and zero-count days are kept.
pub fn parse_contributions(body: &str) -> Result<DailySeries, SourceError> {
    let payload: ContributionsPayload =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    payload
        .contributions
        .into_iter()
        .map(|day| {
            parse_date(&day.date)
                .map(|date| (date, day.count))
                .map_err(|e| SourceError::Decode(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(DailySeries::from_iter)
}

/// Fetches contribution series over HTTP with retry and exponential backoff.
#[derive(Debug, Clone)]
pub struct HttpContributionSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpContributionSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("cc-series/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn url_for(&self, identity: &str) -> String {
        let segment = utf8_percent_encode(identity, IDENTITY_SEGMENT).to_string();
        self.config
            .url_template
            .replace(IDENTITY_PLACEHOLDER, &segment)
    }

    async fn fetch_once(&self, url: &str) -> Result<DailySeries, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(SourceError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        parse_contributions(&body)
    }
}

/// Transport failures and server-side statuses are worth another attempt.
fn is_retryable(error: &SourceError) -> bool {
    match error {
        SourceError::Transport(_) => true,
        SourceError::Status(code) => *code >= 500 || *code == 429,
        SourceError::Decode(_) => false,
    }
}

#[async_trait]
impl ContributionSource for HttpContributionSource {
    async fn fetch(&self, identity: &str) -> Result<DailySeries, SourceError> {
        let url = self.url_for(identity);
        let max_tries = self.config.max_tries.max(1);
        let mut backoff = self.config.backoff;
        let mut attempt = 1;

        loop {
            match self.fetch_once(&url).await {
                Ok(series) => {
                    info!("Fetched {} days for {}", series.len(), identity);
                    return Ok(series);
                }
                Err(e) if attempt < max_tries && is_retryable(&e) => {
                    warn!(
                        "Attempt {}/{}: fetching {} failed: {}",
                        attempt, max_tries, identity, e
                    );
                    info!(
                        "Sleeping for {} milliseconds before retry for {}",
                        backoff.as_millis(),
                        identity
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("All attempts failed for {}: {}", identity, e);
                    return Err(e);
                }
            }
        }
    }
}
