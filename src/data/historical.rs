//! Historical bottom lookup.
//!
//! Fixed indicator readings for known major market bottoms. A date that
//! matches an entry is scored from these values verbatim.

use chrono::NaiveDate;

use crate::types::{Assessment, DataSource, MarketData, ResolvedData};

/// One known bottom.
#[derive(Debug, Clone, Copy)]
pub struct HistoricalBottom {
    pub date: NaiveDate,
    pub event: &'static str,
    pub data: MarketData,
}

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid date in historical table"),
    }
}

const fn bottom(
    date: NaiveDate,
    event: &'static str,
    fear_greed: f64,
    vix: f64,
    rsi_daily: f64,
    rsi_weekly: f64,
    put_call_ratio: f64,
) -> HistoricalBottom {
    HistoricalBottom {
        date,
        event,
        data: MarketData {
            fear_greed,
            vix,
            rsi_daily,
            rsi_weekly,
            put_call_ratio,
        },
    }
}

/// Chronological table of known bottoms.
const BOTTOMS: &[HistoricalBottom] = &[
    bottom(ymd(2011, 10, 4), "US debt downgrade / euro crisis", 12.0, 45.4, 25.0, 31.0, 1.20),
    bottom(ymd(2015, 8, 24), "China devaluation flash crash", 7.0, 40.7, 19.0, 35.0, 1.30),
    bottom(ymd(2016, 2, 11), "Oil collapse / global growth scare", 15.0, 28.1, 27.0, 38.0, 1.15),
    bottom(ymd(2018, 12, 24), "Fed tightening selloff", 5.0, 36.1, 20.0, 30.0, 1.35),
    bottom(ymd(2020, 3, 23), "COVID-19 crash", 3.0, 82.7, 16.0, 32.0, 1.45),
    bottom(ymd(2022, 10, 13), "Inflation bear market low", 8.0, 33.6, 28.0, 34.0, 1.28),
    bottom(ymd(2023, 10, 27), "Rate-driven correction", 22.0, 21.3, 30.0, 42.0, 1.05),
    bottom(ymd(2024, 8, 5), "Yen carry-trade unwind", 18.0, 38.5, 26.0, 45.0, 1.18),
    bottom(ymd(2025, 4, 7), "Tariff shock", 5.0, 45.0, 15.0, 20.0, 1.35),
];

/// Look up the indicator readings for a known bottom.
pub fn lookup(date: NaiveDate) -> Option<MarketData> {
    BOTTOMS.iter().find(|b| b.date == date).map(|b| b.data)
}

/// Whether the date is a known bottom.
pub fn contains(date: NaiveDate) -> bool {
    lookup(date).is_some()
}

/// All known bottoms, oldest first.
pub fn entries() -> &'static [HistoricalBottom] {
    BOTTOMS
}

/// Score every known bottom, oldest first.
pub fn history() -> Vec<Assessment> {
    BOTTOMS
        .iter()
        .map(|b| {
            Assessment::from_resolved(ResolvedData {
                date: b.date,
                source: DataSource::Historical,
                data: b.data,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
