//! Live indicator fetcher.
//!
//! Asks a search-grounded LLM for the indicator readings on a date and
//! validates the answer before it reaches the engine. The response is
//! untrusted: the model may wrap the JSON in prose or code fences, omit
//! keys, return strings, or hallucinate impossible values. Anything that
//! does not pass `parse_indicators` is rejected with a typed error so the
//! resolver can fall back.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use crate::llm::SearchClient;
use crate::types::{BottomError, MarketData};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Exact shape the model is asked to return. All keys required; extra keys
/// are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIndicators {
    fear_greed: f64,
    vix: f64,
    rsi_daily: f64,
    rsi_weekly: f64,
    put_call_ratio: f64,
}

/// Plausibility bounds (inclusive unless noted).
const FEAR_GREED_RANGE: (f64, f64) = (0.0, 100.0);
const VIX_RANGE: (f64, f64) = (0.0, 200.0);
const RSI_RANGE: (f64, f64) = (0.0, 100.0);
/// Lower bound is exclusive.
const PUT_CALL_RANGE: (f64, f64) = (0.0, 10.0);

fn check(name: &str, value: f64, (lo, hi): (f64, f64)) -> Result<f64, BottomError> {
    if !value.is_finite() || value < lo || value > hi {
        return Err(BottomError::MalformedResponse(format!(
            "{name}={value} outside [{lo}, {hi}]"
        )));
    }
    Ok(value)
}

/// Strip markdown fences and surrounding prose, returning the outermost
/// `{...}` span.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse and validate a model response into `MarketData`.
pub fn parse_indicators(text: &str) -> Result<MarketData, BottomError> {
    let json = extract_json_object(text)
        .ok_or_else(|| BottomError::MalformedResponse("no JSON object in response".into()))?;

    let raw: RawIndicators = serde_json::from_str(json)
        .map_err(|e| BottomError::MalformedResponse(e.to_string()))?;

    let put_call_ratio = check("putCallRatio", raw.put_call_ratio, PUT_CALL_RANGE)?;
    if put_call_ratio <= PUT_CALL_RANGE.0 {
        return Err(BottomError::MalformedResponse(format!(
            "putCallRatio={put_call_ratio} must be positive"
        )));
    }

    Ok(MarketData {
        fear_greed: check("fearGreed", raw.fear_greed, FEAR_GREED_RANGE)?,
        vix: check("vix", raw.vix, VIX_RANGE)?,
        rsi_daily: check("rsiDaily", raw.rsi_daily, RSI_RANGE)?,
        rsi_weekly: check("rsiWeekly", raw.rsi_weekly, RSI_RANGE)?,
        put_call_ratio,
    })
}

/// Prompt requesting the indicators for a date as strict JSON.
pub fn build_prompt(date: NaiveDate) -> String {
    format!(
        "Search for real stock market data on {date}.\n\
         I need these indicators for QQQ/Nasdaq:\n\
         1. CNN Fear & Greed Index (0-100)\n\
         2. CBOE VIX Index\n\
         3. RSI (14) on the daily chart and on the weekly chart\n\
         4. Equity Put/Call Ratio\n\
         Provide the result strictly in JSON format: \
         {{\"fearGreed\": number, \"vix\": number, \"rsiDaily\": number, \
         \"rsiWeekly\": number, \"putCallRatio\": number}}",
        date = date.format("%Y-%m-%d"),
    )
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Fetches validated indicator data through a `SearchClient`.
pub struct LiveFetcher {
    client: Box<dyn SearchClient>,
}

impl LiveFetcher {
    pub fn new(client: Box<dyn SearchClient>) -> Self {
        Self { client }
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Fetch and validate indicators for a date.
    pub async fn fetch(&self, date: NaiveDate) -> Result<MarketData, BottomError> {
        let prompt = build_prompt(date);
        debug!(%date, model = %self.client.model_name(), "Fetching live indicators");

        let text = self.client.search(&prompt).await.map_err(|e| BottomError::Llm {
            model: self.client.model_name().to_string(),
            message: format!("{e:#}"),
        })?;

        let data = parse_indicators(&text)?;
        info!(%date, data = %data, "Live indicators received");
        Ok(data)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
