//! Shared types for BOTTOM GAUGE.
//!
//! These types form the data model used across all modules: the indicator
//! snapshot fed into the scoring engine, the scored result, and the
//! provenance wrappers the resolver and outer surfaces pass around.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring::status::{Status, StatusColor};

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

/// One snapshot of the four bottom indicators (RSI counts twice).
///
/// Values are not clamped on construction; external sources may report
/// readings outside the nominal ranges and the engine copes with that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    /// CNN Fear & Greed Index (0 = extreme fear, 100 = extreme greed)
    pub fear_greed: f64,
    /// CBOE volatility index
    pub vix: f64,
    /// 14-day RSI on the daily chart (0–100)
    pub rsi_daily: f64,
    /// 14-period RSI on the weekly chart (0–100)
    pub rsi_weekly: f64,
    /// Equity put/call ratio
    pub put_call_ratio: f64,
}

impl MarketData {
    pub fn new(
        fear_greed: f64,
        vix: f64,
        rsi_daily: f64,
        rsi_weekly: f64,
        put_call_ratio: f64,
    ) -> Self {
        Self {
            fear_greed,
            vix,
            rsi_daily,
            rsi_weekly,
            put_call_ratio,
        }
    }

    /// Mean of the daily and weekly RSI readings.
    pub fn avg_rsi(&self) -> f64 {
        (self.rsi_daily + self.rsi_weekly) / 2.0
    }

    /// Set both RSI readings to the same value.
    pub fn with_rsi(mut self, rsi: f64) -> Self {
        self.rsi_daily = rsi;
        self.rsi_weekly = rsi;
        self
    }

    /// Whether every field is a finite number.
    pub fn is_finite(&self) -> bool {
        [
            self.fear_greed,
            self.vix,
            self.rsi_daily,
            self.rsi_weekly,
            self.put_call_ratio,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Neutral starting point: mid-range sentiment, calm volatility.
impl Default for MarketData {
    fn default() -> Self {
        Self::new(50.0, 15.0, 50.0, 50.0, 0.8)
    }
}

impl fmt::Display for MarketData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "F&G={:.0} VIX={:.1} RSI(d/w)={:.0}/{:.0} PCR={:.2}",
            self.fear_greed, self.vix, self.rsi_daily, self.rsi_weekly, self.put_call_ratio,
        )
    }
}

// ---------------------------------------------------------------------------
// Score result
// ---------------------------------------------------------------------------

/// Output of the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Sum of the four sub-scores, always within [0, 100]
    pub total_score: f64,
    pub fear_greed_score: f64,
    pub vix_score: f64,
    pub rsi_score: f64,
    pub put_call_score: f64,
    pub status: Status,
    pub status_color: StatusColor,
}

impl ScoreResult {
    /// Tier number of the status (1 = most extreme bottom).
    pub fn tier(&self) -> u8 {
        self.status.tier()
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}/100 [{}] (F&G {:.1} | VIX {:.1} | RSI {:.1} | PCR {:.1})",
            self.total_score,
            self.status,
            self.fear_greed_score,
            self.vix_score,
            self.rsi_score,
            self.put_call_score,
        )
    }
}

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

/// Where a `MarketData` snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Known historical bottom, used verbatim.
    Historical,
    /// Fetched from a search-grounded LLM for a recent date.
    Live,
    /// Seeded pseudo-random filler. Not real market data.
    Fallback,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Historical => write!(f, "historical"),
            DataSource::Live => write!(f, "live"),
            DataSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Indicator data for a date, tagged with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedData {
    pub date: NaiveDate,
    pub source: DataSource,
    pub data: MarketData,
}

/// A resolved snapshot together with its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub date: NaiveDate,
    pub source: DataSource,
    pub data: MarketData,
    pub result: ScoreResult,
}

impl Assessment {
    /// Score a resolved snapshot.
    pub fn from_resolved(resolved: ResolvedData) -> Self {
        Self {
            date: resolved.date,
            source: resolved.source,
            data: resolved.data,
            result: crate::scoring::score(&resolved.data),
        }
    }

    /// Replace the indicator data and re-run the engine.
    pub fn rescore(&mut self, data: MarketData) {
        self.data = data;
        self.result = crate::scoring::score(&data);
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.date, self.source, self.result)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for BOTTOM GAUGE.
#[derive(Debug, thiserror::Error)]
pub enum BottomError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date {date} is outside the supported range {min}..={max}")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    #[error("LLM error ({model}): {message}")]
    Llm { model: String, message: String },

    #[error("Malformed indicator response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
