//! Bottom score engine.
//!
//! Maps a `MarketData` snapshot onto four sub-scores of 0–25 points each
//! and classifies the total into a status tier. Pure and total: any finite
//! input yields a finite result within [0, 100], with no I/O or logging.
//!
//! | Indicator    | 0 points        | 25 points        |
//! |--------------|-----------------|------------------|
//! | Fear & Greed | index 100       | index 0          |
//! | VIX          | ≤ 15            | ≥ 30             |
//! | RSI (avg)    | ≥ 70            | ≤ 30             |
//! | Put/Call     | ≤ 0.6           | ≥ 1.1            |

pub mod status;

use crate::types::{MarketData, ScoreResult};
use status::Status;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Points available per indicator.
pub const MAX_SUB_SCORE: f64 = 25.0;

/// Sum of all four sub-scores at saturation.
pub const MAX_TOTAL_SCORE: f64 = 4.0 * MAX_SUB_SCORE;

/// Fear & Greed index points per scoring point.
const FEAR_GREED_DIVISOR: f64 = 4.0;

/// VIX at or below this scores nothing.
pub const VIX_CALM: f64 = 15.0;
/// VIX at or above this scores full points.
pub const VIX_PANIC: f64 = 30.0;

/// Average RSI at or above this scores nothing.
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// Average RSI at or below this scores full points.
pub const RSI_OVERSOLD: f64 = 30.0;

/// Put/call ratio at or below this scores nothing.
pub const PUT_CALL_COMPLACENT: f64 = 0.6;
/// Put/call ratio at or above this scores full points.
pub const PUT_CALL_FEARFUL: f64 = 1.1;

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

fn clamp_points(raw: f64) -> f64 {
    raw.clamp(0.0, MAX_SUB_SCORE)
}

/// Extreme fear (index 0) earns 25 points, extreme greed (100) earns none.
pub fn fear_greed_score(fear_greed: f64) -> f64 {
    clamp_points((100.0 - fear_greed) / FEAR_GREED_DIVISOR)
}

/// Linear ramp between calm and panic volatility, saturating outside.
pub fn vix_score(vix: f64) -> f64 {
    if vix >= VIX_PANIC {
        MAX_SUB_SCORE
    } else if vix <= VIX_CALM {
        0.0
    } else {
        (vix - VIX_CALM) / (VIX_PANIC - VIX_CALM) * MAX_SUB_SCORE
    }
}

/// Scores the mean of the daily and weekly RSI; oversold earns the most.
pub fn rsi_score(rsi_daily: f64, rsi_weekly: f64) -> f64 {
    let avg = (rsi_daily + rsi_weekly) / 2.0;
    clamp_points((RSI_OVERBOUGHT - avg) / (RSI_OVERBOUGHT - RSI_OVERSOLD) * MAX_SUB_SCORE)
}

/// Heavy put buying (hedging) earns the most.
pub fn put_call_score(put_call_ratio: f64) -> f64 {
    clamp_points(
        (put_call_ratio - PUT_CALL_COMPLACENT) / (PUT_CALL_FEARFUL - PUT_CALL_COMPLACENT)
            * MAX_SUB_SCORE,
    )
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Score a snapshot and classify the total.
pub fn score(data: &MarketData) -> ScoreResult {
    let fear_greed_score = fear_greed_score(data.fear_greed);
    let vix_score = vix_score(data.vix);
    let rsi_score = rsi_score(data.rsi_daily, data.rsi_weekly);
    let put_call_score = put_call_score(data.put_call_ratio);

    let total_score = fear_greed_score + vix_score + rsi_score + put_call_score;
    let status = Status::classify(total_score);

    ScoreResult {
        total_score,
        fear_greed_score,
        vix_score,
        rsi_score,
        put_call_score,
        status,
        status_color: status.color(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
