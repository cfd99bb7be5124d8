//! Live exchange-rate sources
//!
//! Each source answers a single `from -> to` lookup. A source makes exactly one
//! attempt per call and never retries; tier ordering lives in
//! [`super::RateProvider`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::settings::RateSettings;
use crate::error::{PupilError, RateError};
use crate::models::Currency;

/// A live rate lookup
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Fetch the rate for one unit of `from` expressed in `to`
    async fn fetch_rate(&self, from: Currency, to: Currency) -> Result<f64, RateError>;
}

/// Build the shared HTTP client for the live tiers
pub fn http_client(settings: &RateSettings) -> Result<reqwest::Client, PupilError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| PupilError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Body of a rate-table response: `{"rates": {"EUR": 0.92, ...}}`
#[derive(Debug, Default, Deserialize)]
pub struct RateTableResponse {
    #[serde(default)]
    pub rates: Option<HashMap<String, serde_json::Value>>,
}

/// Body of a pair-conversion response: `{"result": 0.92}`
#[derive(Debug, Default, Deserialize)]
pub struct PairConversionResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

/// Rates must be finite and strictly positive to count as present
fn usable(value: Option<&serde_json::Value>) -> Option<f64> {
    value
        .and_then(serde_json::Value::as_f64)
        .filter(|rate| rate.is_finite() && *rate > 0.0)
}

/// Pull the rate for `to` out of a rate-table body
pub fn extract_table_rate(
    source_name: &'static str,
    body: &RateTableResponse,
    from: Currency,
    to: Currency,
) -> Result<f64, RateError> {
    usable(body.rates.as_ref().and_then(|rates| rates.get(to.code()))).ok_or(
        RateError::MissingRateInPair {
            source_name,
            from,
            to,
        },
    )
}

/// Pull the rate out of a pair-conversion body for an amount of 1
pub fn extract_pair_rate(
    source_name: &'static str,
    body: &PairConversionResponse,
    from: Currency,
    to: Currency,
) -> Result<f64, RateError> {
    usable(body.result.as_ref()).ok_or(RateError::MissingRateInPair {
        source_name,
        from,
        to,
    })
}

fn network_failure(source_name: &'static str, err: reqwest::Error) -> RateError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else if let Some(status) = err.status() {
        format!("HTTP {}", status)
    } else if err.is_decode() {
        format!("invalid response body: {}", err)
    } else {
        err.to_string()
    };
    RateError::NetworkFailure {
        source_name,
        reason,
    }
}

/// Primary tier: fetches the full table for the base currency
#[derive(Debug, Clone)]
pub struct RateTableSource {
    client: reqwest::Client,
    base_url: String,
}

impl RateTableSource {
    pub const NAME: &'static str = "Free API";

    /// `base_url` is a prefix; the base currency code is appended
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, from: Currency) -> String {
        format!("{}{}", self.base_url, from.code())
    }
}

#[async_trait]
impl RateSource for RateTableSource {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch_rate(&self, from: Currency, to: Currency) -> Result<f64, RateError> {
        let url = self.url_for(from);
        debug!(source = Self::NAME, %url, "requesting rate table");

        let body: RateTableResponse = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| network_failure(Self::NAME, e))?
            .json()
            .await
            .map_err(|e| network_failure(Self::NAME, e))?;

        extract_table_rate(Self::NAME, &body, from, to)
    }
}

/// Secondary tier: converts a single unit of the pair
#[derive(Debug, Clone)]
pub struct PairConversionSource {
    client: reqwest::Client,
    url: String,
}

impl PairConversionSource {
    pub const NAME: &'static str = "Conversion API";

    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RateSource for PairConversionSource {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch_rate(&self, from: Currency, to: Currency) -> Result<f64, RateError> {
        debug!(source = Self::NAME, url = %self.url, %from, %to, "requesting pair conversion");

        let body: PairConversionResponse = self
            .client
            .get(&self.url)
            .query(&[("from", from.code()), ("to", to.code()), ("amount", "1")])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| network_failure(Self::NAME, e))?
            .json()
            .await
            .map_err(|e| network_failure(Self::NAME, e))?;

        extract_pair_rate(Self::NAME, &body, from, to)
    }
}

/// A source that always fails without touching the network
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource {
    name: &'static str,
}

impl OfflineSource {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl RateSource for OfflineSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_rate(&self, _from: Currency, _to: Currency) -> Result<f64, RateError> {
        Err(RateError::NetworkFailure {
            source_name: self.name,
            reason: "offline mode".to_string(),
        })
    }
}

/// Timeout applied to the shared client, for logging
pub fn describe_timeout(timeout: Option<Duration>) -> String {
    match timeout {
        Some(t) => format!("{}s", t.as_secs()),
        None => "client default".to_string(),
    }
}
