//! Rate-provider client and cross-rate currency conversion.
//!
//! The provider's free tier only publishes daily rate tables relative to a
//! single pivot currency (EUR), never direct pairs. A conversion therefore
//! derives the cross rate `rates[to] / rates[from]` from one fetched table
//! and multiplies the amount by it.
//!
//! One conversion issues exactly one outbound HTTP request: `/latest` when
//! the requested date is absent or equals today, `/{date}` otherwise. There
//! is no caching, no retry and no timeout beyond the transport default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Error type for conversion operations.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Caller input failed validation, or the provider logically rejected
    /// the request (unknown currency, rate limit). Never retried.
    #[error("{0}")]
    InvalidRequest(String),

    /// The provider answered with a non-success transport status.
    #[error("HTTP error! status: {status}")]
    Upstream { status: u16 },

    /// Network failure or malformed provider payload.
    #[error("Error fetching exchange rates: {details}")]
    Internal { details: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Request / response types
// ─────────────────────────────────────────────────────────────────────────────

/// A conversion request as it arrives off the wire.
///
/// Everything is optional at this stage; [`RateClient::convert`] validates
/// before any network call. `amount` is kept as raw JSON because callers
/// send it both as a number and as a string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertRequest {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A successful conversion.
///
/// `date` is the rate table's effective date exactly as the provider
/// reported it. It may differ from the requested date when the provider
/// substitutes the nearest available table; that pass-through is intentional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub result: f64,
    pub rate: f64,
    pub date: String,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    date: String,
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(default)]
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    info: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct ValidRequest {
    from: String,
    to: String,
    amount: f64,
    date: Option<String>,
}

fn validate(req: ConvertRequest) -> Result<ValidRequest, ConvertError> {
    let from = req.from.unwrap_or_default();
    let to = req.to.unwrap_or_default();
    let amount = req.amount.as_ref().and_then(parse_amount);

    match amount {
        Some(amount) if !from.is_empty() && !to.is_empty() && amount.is_finite() => {
            Ok(ValidRequest {
                from,
                to,
                amount,
                date: req.date,
            })
        }
        _ => Err(ConvertError::InvalidRequest(
            "Missing or invalid parameters. Required: from, to, amount".into(),
        )),
    }
}

fn parse_amount(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Today's calendar date from the UTC clock, `YYYY-MM-DD`.
///
/// The latest-vs-historical decision compares the caller's date string to
/// this value with no timezone normalization, so requests sent near local
/// midnight can land on the historical path for what the caller considers
/// "today". Documented behavior, kept as-is.
fn today() -> String {
    chrono::Utc::now().date_naive().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Cross-rate math
// ─────────────────────────────────────────────────────────────────────────────

/// Derives the `from -> to` rate from a pivot-relative table.
///
/// A missing, zero or non-finite entry for either code is an unknown
/// currency; the division must never produce Infinity or NaN.
fn cross_rate(rates: &HashMap<String, f64>, from: &str, to: &str) -> Result<f64, ConvertError> {
    let from_rate = *rates
        .get(from)
        .filter(|r| r.is_finite() && **r != 0.0)
        .ok_or_else(|| ConvertError::InvalidRequest(format!("Unknown currency: {from}")))?;
    let to_rate = *rates
        .get(to)
        .filter(|r| r.is_finite() && **r != 0.0)
        .ok_or_else(|| ConvertError::InvalidRequest(format!("Unknown currency: {to}")))?;

    Ok(to_rate / from_rate)
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

const DEFAULT_BASE_URL: &str = "http://data.fixer.io/api";

/// Rate-provider API client.
pub struct RateClient {
    base_url: String,
    access_key: Option<String>,
    http: reqwest::Client,
}

impl RateClient {
    /// Creates a new client against the default provider.
    ///
    /// The access key is optional here so that a missing credential surfaces
    /// as a per-request `InvalidRequest` instead of a startup crash.
    pub fn new(access_key: Option<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_key,
            http: reqwest::Client::new(),
        }
    }

    /// Overrides the provider base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Converts `amount` from one currency to another.
    ///
    /// Validation happens before any network call; exactly one request is
    /// issued on the happy path.
    pub async fn convert(&self, req: ConvertRequest) -> Result<Conversion, ConvertError> {
        let req = validate(req)?;

        let access_key = self.access_key.as_deref().ok_or_else(|| {
            ConvertError::InvalidRequest(
                "Missing or invalid parameters. Required: from, to, amount".into(),
            )
        })?;

        // Today's table lives at /latest; anything else is a dated lookup.
        // An empty date counts as absent, like the provider function's
        // falsy-date fallback.
        let endpoint = match req.date.as_deref().filter(|d| !d.is_empty()) {
            None => "latest".to_string(),
            Some(date) if date == today() => "latest".to_string(),
            Some(date) => date.to_string(),
        };
        let url = format!("{}/{}", self.base_url, endpoint);

        tracing::debug!(from = %req.from, to = %req.to, %endpoint, "fetching rate table");

        let response = self
            .http
            .get(&url)
            .query(&[("access_key", access_key)])
            .send()
            .await
            .map_err(|e| ConvertError::Internal {
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: ProviderResponse =
            response.json().await.map_err(|e| ConvertError::Internal {
                details: e.to_string(),
            })?;

        if !body.success {
            // Forward the provider's own explanation verbatim.
            let info = body
                .error
                .map(|e| e.info)
                .filter(|info| !info.is_empty())
                .unwrap_or_else(|| "Failed to get exchange rate".to_string());
            return Err(ConvertError::InvalidRequest(info));
        }

        let rate = cross_rate(&body.rates, &req.from, &req.to)?;

        Ok(Conversion {
            result: req.amount * rate,
            rate,
            from: req.from,
            to: req.to,
            amount: req.amount,
            date: body.date,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
