//! End-to-end resolution: date → source selection → score.

use chrono::NaiveDate;

use bottom_gauge::config::AppConfig;
use bottom_gauge::data::{fallback, historical, DataResolver, LiveFetcher};
use bottom_gauge::scoring::status::Status;
use bottom_gauge::types::{DataSource, MarketData};

use crate::stub_client::StubClient;

const LIVE_PANIC: &str = r#"Based on search results:
```json
{"fearGreed": 4, "vix": 52.3, "rsiDaily": 18, "rsiWeekly": 27, "putCallRatio": 1.38}
```"#;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    ymd(2026, 10, 19)
}

fn resolver_with(stub: &StubClient) -> DataResolver {
    DataResolver::from_config(
        &AppConfig::default(),
        Some(LiveFetcher::new(Box::new(stub.clone()))),
    )
    .unwrap()
    .with_today(today())
}

#[tokio::test]
async fn live_panic_reading_scores_as_century_bottom() {
    let stub = StubClient::new().respond(LIVE_PANIC);
    let resolver = resolver_with(&stub);

    let a = resolver.assess(ymd(2026, 10, 16)).await.unwrap();

    assert_eq!(a.source, DataSource::Live);
    assert_eq!(a.data, MarketData::new(4.0, 52.3, 18.0, 27.0, 1.38));
    assert_eq!(a.result.status, Status::CenturyBottom);
    assert_eq!(stub.call_count(), 1);
    assert!(stub.prompts()[0].contains("2026-10-16"));
}

#[tokio::test]
async fn failing_service_degrades_to_fallback() {
    let stub = StubClient::new().fail("HTTP 503: overloaded");
    let resolver = resolver_with(&stub);
    let date = ymd(2026, 10, 2);

    let a = resolver.assess(date).await.unwrap();

    assert_eq!(a.source, DataSource::Fallback);
    assert_eq!(a.data, fallback::generate(date));
    assert!(a.result.total_score >= 0.0 && a.result.total_score <= 100.0);
}

#[tokio::test]
async fn each_recent_date_triggers_its_own_fetch() {
    let stub = StubClient::new()
        .respond(LIVE_PANIC)
        .respond("not json at all");
    let resolver = resolver_with(&stub);

    let first = resolver.resolve(ymd(2026, 10, 15)).await.unwrap();
    let second = resolver.resolve(ymd(2026, 10, 14)).await.unwrap();

    assert_eq!(first.source, DataSource::Live);
    assert_eq!(second.source, DataSource::Fallback);
    assert_eq!(stub.call_count(), 2);
}

#[tokio::test]
async fn historical_and_old_dates_never_hit_the_service() {
    let stub = StubClient::new().respond(LIVE_PANIC);
    let resolver = resolver_with(&stub);

    for b in historical::entries() {
        let resolved = resolver.resolve(b.date).await.unwrap();
        assert_eq!(resolved.source, DataSource::Historical);
        assert_eq!(resolved.data, b.data);
    }

    let old = resolver.resolve(ymd(2014, 5, 5)).await.unwrap();
    assert_eq!(old.source, DataSource::Fallback);
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn fallback_is_reproducible_across_resolvers() {
    let a = DataResolver::new(None).with_today(today());
    let b = DataResolver::new(None).with_today(today());
    let date = ymd(2017, 11, 3);

    assert_eq!(
        a.resolve(date).await.unwrap().data,
        b.resolve(date).await.unwrap().data
    );
}

#[tokio::test]
async fn manual_override_rescores() {
    let resolver = DataResolver::new(None).with_today(today());
    let mut a = resolver.assess(ymd(2023, 10, 27)).await.unwrap();
    assert_eq!(a.result.status, Status::SellingInProgress);

    a.rescore(a.data.with_rsi(20.0));
    assert_eq!(a.result.rsi_score, 25.0);
    assert_eq!(a.result.status, Status::SellingInProgress);

    a.rescore(MarketData { vix: 27.0, ..a.data });
    assert_eq!(a.result.status, Status::OversoldBottom);
}
