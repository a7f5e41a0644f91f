//! Status tiers for the composite bottom score.
//!
//! Thresholds are checked in descending order and the first match wins,
//! so every total (including out-of-range values) lands in exactly one tier.
//! Lower bounds are inclusive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a total score, most extreme bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Total ≥ 90.
    #[serde(rename = "century-level bottom (strong buy)")]
    CenturyBottom,
    /// 80 ≤ total < 90.
    #[serde(rename = "oversold bottom zone (consider buying)")]
    OversoldBottom,
    /// 70 ≤ total < 80.
    #[serde(rename = "selling in progress (watch)")]
    SellingInProgress,
    /// 60 ≤ total < 70.
    #[serde(rename = "normal-year stage (neutral)")]
    NormalYear,
    /// Total < 60.
    #[serde(rename = "near top (risk management)")]
    NearTop,
}

/// Display tier tag, one per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Red,
    Orange,
    Yellow,
    Emerald,
    Blue,
}

impl Status {
    /// All tiers in classification order.
    pub const ALL: &'static [Status] = &[
        Status::CenturyBottom,
        Status::OversoldBottom,
        Status::SellingInProgress,
        Status::NormalYear,
        Status::NearTop,
    ];

    /// Classify a total score.
    pub fn classify(total_score: f64) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.min_score().map_or(true, |min| total_score >= min))
            .unwrap_or(Status::NearTop)
    }

    /// Inclusive lower bound of the tier; `None` for the catch-all tier.
    pub fn min_score(&self) -> Option<f64> {
        match self {
            Self::CenturyBottom => Some(90.0),
            Self::OversoldBottom => Some(80.0),
            Self::SellingInProgress => Some(70.0),
            Self::NormalYear => Some(60.0),
            Self::NearTop => None,
        }
    }

    /// 1 (most extreme) through 5.
    pub fn tier(&self) -> u8 {
        match self {
            Self::CenturyBottom => 1,
            Self::OversoldBottom => 2,
            Self::SellingInProgress => 3,
            Self::NormalYear => 4,
            Self::NearTop => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CenturyBottom => "century-level bottom (strong buy)",
            Self::OversoldBottom => "oversold bottom zone (consider buying)",
            Self::SellingInProgress => "selling in progress (watch)",
            Self::NormalYear => "normal-year stage (neutral)",
            Self::NearTop => "near top (risk management)",
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            Self::CenturyBottom => StatusColor::Red,
            Self::OversoldBottom => StatusColor::Orange,
            Self::SellingInProgress => StatusColor::Yellow,
            Self::NormalYear => StatusColor::Emerald,
            Self::NearTop => StatusColor::Blue,
        }
    }

    /// Guide text shown next to the tier.
    pub fn description(&self) -> &'static str {
        match self {
            Self::CenturyBottom => {
                "Historic major bottom. Fear is at its peak, offering the highest-probability buying opportunity."
            }
            Self::OversoldBottom => {
                "Sentiment has contracted. A reasonable point to start scaling into positions."
            }
            Self::SellingInProgress => {
                "Corrective pressure is building. Watch for further downside before acting."
            }
            Self::NormalYear => "The market is sitting within a relatively stable, average range.",
            Self::NearTop => "Little fear in the market. Focus on managing risk rather than buying.",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusColor::Red => write!(f, "red"),
            StatusColor::Orange => write!(f, "orange"),
            StatusColor::Yellow => write!(f, "yellow"),
            StatusColor::Emerald => write!(f, "emerald"),
            StatusColor::Blue => write!(f, "blue"),
        }
    }
}

/// One row of the tier guide.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierGuide {
    pub tier: u8,
    pub status: Status,
    pub color: StatusColor,
    pub min_score: Option<f64>,
    pub description: &'static str,
}

/// The full tier guide in classification order.
pub fn tier_guide() -> Vec<TierGuide> {
    Status::ALL
        .iter()
        .map(|s| TierGuide {
            tier: s.tier(),
            status: *s,
            color: s.color(),
            min_score: s.min_score(),
            description: s.description(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
