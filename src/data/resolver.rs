//! Date → indicator data resolution.
//!
//! Picks a source for a calendar date in priority order:
//! 1. historical table (verbatim),
//! 2. live fetch, when the date falls within the trailing window and a
//!    fetcher is configured,
//! 3. deterministic fallback.
//!
//! A failed live fetch is a soft failure: it is logged and replaced by
//! fallback data, never surfaced to the caller.

use chrono::{Months, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::live::LiveFetcher;
use super::{fallback, historical};
use crate::config::{AppConfig, DEFAULT_MIN_DATE};
use crate::types::{Assessment, BottomError, DataSource, ResolvedData};

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, BottomError> {
    let trimmed = s.trim();
    if trimmed.len() != 10 {
        return Err(BottomError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| BottomError::InvalidDate(s.to_string()))
}

pub struct DataResolver {
    live: Option<LiveFetcher>,
    min_date: NaiveDate,
    live_window_months: u32,
    /// Fixed "today" for tests; `None` means the current UTC date.
    today: Option<NaiveDate>,
}

impl DataResolver {
    pub fn new(live: Option<LiveFetcher>) -> Self {
        Self {
            live,
            min_date: DEFAULT_MIN_DATE,
            live_window_months: 1,
            today: None,
        }
    }

    /// Build a resolver with the bounds from configuration.
    pub fn from_config(cfg: &AppConfig, live: Option<LiveFetcher>) -> Result<Self, BottomError> {
        Ok(Self {
            min_date: cfg.min_date()?,
            live_window_months: cfg.app.live_window_months,
            ..Self::new(live)
        })
    }

    /// Pin "today" to a fixed date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn has_live(&self) -> bool {
        self.live.is_some()
    }

    /// Whether `date` falls within the trailing live-data window.
    pub fn is_within_live_window(&self, date: NaiveDate) -> bool {
        let today = self.today();
        let window_start = today
            .checked_sub_months(Months::new(self.live_window_months))
            .unwrap_or(NaiveDate::MIN);
        date >= window_start && date <= today
    }

    fn check_range(&self, date: NaiveDate) -> Result<(), BottomError> {
        let today = self.today();
        if date < self.min_date || date > today {
            return Err(BottomError::DateOutOfRange {
                date,
                min: self.min_date,
                max: today,
            });
        }
        Ok(())
    }

    /// Resolve indicator data for a date.
    pub async fn resolve(&self, date: NaiveDate) -> Result<ResolvedData, BottomError> {
        self.check_range(date)?;

        if let Some(data) = historical::lookup(date) {
            debug!(%date, "Historical bottom matched");
            return Ok(ResolvedData {
                date,
                source: DataSource::Historical,
                data,
            });
        }

        if self.is_within_live_window(date) {
            if let Some(live) = &self.live {
                match live.fetch(date).await {
                    Ok(data) => {
                        return Ok(ResolvedData {
                            date,
                            source: DataSource::Live,
                            data,
                        })
                    }
                    Err(e) => {
                        warn!(%date, model = %live.model_name(), error = %e, "Live fetch failed, using fallback data");
                    }
                }
            } else {
                debug!(%date, "Date within live window but no live fetcher configured");
            }
        }

        Ok(ResolvedData {
            date,
            source: DataSource::Fallback,
            data: fallback::generate(date),
        })
    }

    /// Resolve a date and score it.
    pub async fn assess(&self, date: NaiveDate) -> Result<Assessment, BottomError> {
        let resolved = self.resolve(date).await?;
        let assessment = Assessment::from_resolved(resolved);
        info!(
            %date,
            source = %assessment.source,
            total = format!("{:.2}", assessment.result.total_score),
            status = %assessment.result.status,
            "Assessment complete"
        );
        Ok(assessment)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
