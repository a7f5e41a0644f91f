//! Deterministic fallback generator.
//!
//! Produces plausible-looking indicator values for dates with no historical
//! or live data. The values are NOT market data; they exist so a score can
//! always be shown. Output is reproducible for a given date.
//!
//! Algorithm:
//! - `seed = year + month + day`
//! - `hash(s) = frac(sin(s) * 10000)`
//! - each indicator is `base + hash(seed + k) * span`, rounded to display
//!   precision, with `k` = 0..4 in field order.
//!
//! Dates whose components sum to the same seed get identical data.

use chrono::{Datelike, NaiveDate};

use crate::types::MarketData;

/// (base, span, decimals) per field, in seed-offset order.
const FEAR_GREED: (f64, f64, i32) = (30.0, 50.0, 0);
const VIX: (f64, f64, i32) = (12.0, 15.0, 1);
const RSI_DAILY: (f64, f64, i32) = (35.0, 40.0, 0);
const RSI_WEEKLY: (f64, f64, i32) = (40.0, 30.0, 0);
const PUT_CALL: (f64, f64, i32) = (0.65, 0.4, 2);

/// Seed derived from the numeric date components.
pub fn seed(date: NaiveDate) -> f64 {
    (date.year() + date.month() as i32 + date.day() as i32) as f64
}

/// Fractional part of `sin(s) * 10000`, in [0, 1).
pub fn hash(s: f64) -> f64 {
    let x = s.sin() * 10000.0;
    x - x.floor()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn field(seed: f64, offset: f64, (base, span, decimals): (f64, f64, i32)) -> f64 {
    round_to(base + hash(seed + offset) * span, decimals)
}

/// Generate filler indicator values for a date.
pub fn generate(date: NaiveDate) -> MarketData {
    let s = seed(date);
    MarketData {
        fear_greed: field(s, 0.0, FEAR_GREED),
        vix: field(s, 1.0, VIX),
        rsi_daily: field(s, 2.0, RSI_DAILY),
        rsi_weekly: field(s, 3.0, RSI_WEEKLY),
        put_call_ratio: field(s, 4.0, PUT_CALL),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
