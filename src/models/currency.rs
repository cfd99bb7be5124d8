//! Currency conversion model
//!
//! Currencies come from a fixed enumerated list; conversion results carry the
//! rate that was applied and where that rate came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Chf,
    Cny,
    Inr,
}

impl Currency {
    /// Every supported currency, in display order
    pub const ALL: [Currency; 9] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Jpy,
        Self::Cad,
        Self::Aud,
        Self::Chf,
        Self::Cny,
        Self::Inr,
    ];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Chf => "CHF",
            Self::Cny => "CNY",
            Self::Inr => "INR",
        }
    }

    /// Parse a currency code (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A request to convert an amount between two currencies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionQuery {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
}

impl ConversionQuery {
    pub fn new(amount: f64, from: Currency, to: Currency) -> Self {
        Self { amount, from, to }
    }

    /// True when no lookup is needed
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

/// Which live tier answered a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveTier {
    /// Rate table keyed by base currency
    Primary,
    /// Direct pair-conversion endpoint
    Secondary,
}

/// Where a conversion rate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tier")]
pub enum Provenance {
    /// `from == to`; no lookup was performed
    Identity,
    /// Answered by a live source
    Live(LiveTier),
    /// Answered by the static fallback table
    FallbackTable,
}

impl Provenance {
    /// Human readable label for the source
    pub fn label(&self) -> &'static str {
        match self {
            Self::Identity => "Identity",
            Self::Live(LiveTier::Primary) => "Free API",
            Self::Live(LiveTier::Secondary) => "Conversion API",
            Self::FallbackTable => "Fallback table",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub query: ConversionQuery,
    pub converted_amount: f64,
    pub rate: f64,
    pub provenance: Provenance,
    pub timestamp: DateTime<Utc>,
}

impl ConversionResult {
    /// Apply `rate` to the query amount, stamping the current time
    pub fn new(query: ConversionQuery, rate: f64, provenance: Provenance) -> Self {
        Self {
            query,
            converted_amount: query.amount * rate,
            rate,
            provenance,
            timestamp: Utc::now(),
        }
    }
}
