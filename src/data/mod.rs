//! Indicator data sources.
//!
//! Three interchangeable producers of `MarketData`: a fixed historical
//! table, a live fetcher backed by a search-grounded LLM, and a
//! deterministic fallback generator. `resolver` picks between them for a
//! given date; the scoring engine never knows which one was used.

pub mod fallback;
pub mod historical;
pub mod live;
pub mod resolver;

pub use live::LiveFetcher;
pub use resolver::{parse_date, DataResolver};
