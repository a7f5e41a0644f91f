use bottom_gauge::scoring::status::Status;
use bottom_gauge::scoring::{self, MAX_SUB_SCORE, MAX_TOTAL_SCORE};
use bottom_gauge::types::MarketData;
use proptest::prelude::*;

/// Wide enough to include readings well outside the nominal ranges.
fn arb_market_data() -> impl Strategy<Value = MarketData> {
    (
        -50.0f64..200.0,
        0.0f64..150.0,
        -20.0f64..120.0,
        -20.0f64..120.0,
        0.0f64..5.0,
    )
        .prop_map(|(fg, vix, rd, rw, pcr)| MarketData::new(fg, vix, rd, rw, pcr))
}

// ── Bounds ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn scores_stay_within_bounds(data in arb_market_data()) {
        let r = scoring::score(&data);
        for sub in [r.fear_greed_score, r.vix_score, r.rsi_score, r.put_call_score] {
            prop_assert!(sub.is_finite());
            prop_assert!((0.0..=MAX_SUB_SCORE).contains(&sub), "sub-score {}", sub);
        }
        prop_assert!((0.0..=MAX_TOTAL_SCORE).contains(&r.total_score));
    }

    #[test]
    fn total_is_sum_of_parts(data in arb_market_data()) {
        let r = scoring::score(&data);
        let sum = r.fear_greed_score + r.vix_score + r.rsi_score + r.put_call_score;
        prop_assert!((r.total_score - sum).abs() < 1e-12);
    }

    #[test]
    fn status_agrees_with_classifier(data in arb_market_data()) {
        let r = scoring::score(&data);
        prop_assert_eq!(r.status, Status::classify(r.total_score));
        prop_assert_eq!(r.status_color, r.status.color());
    }
}

// ── Monotonicity ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn lower_fear_greed_never_scores_less(a in -50.0f64..200.0, b in -50.0f64..200.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(scoring::fear_greed_score(lo) >= scoring::fear_greed_score(hi));
    }

    #[test]
    fn higher_vix_never_scores_less(a in 0.0f64..150.0, b in 0.0f64..150.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(scoring::vix_score(hi) >= scoring::vix_score(lo));
    }

    #[test]
    fn lower_rsi_never_scores_less(a in -20.0f64..120.0, b in -20.0f64..120.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(scoring::rsi_score(lo, lo) >= scoring::rsi_score(hi, hi));
    }

    #[test]
    fn higher_put_call_never_scores_less(a in 0.0f64..5.0, b in 0.0f64..5.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(scoring::put_call_score(hi) >= scoring::put_call_score(lo));
    }
}

// ── Saturation ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn calm_vix_scores_zero(vix in 0.0f64..=15.0) {
        prop_assert_eq!(scoring::vix_score(vix), 0.0);
    }

    #[test]
    fn panic_vix_scores_full(vix in 30.0f64..500.0) {
        prop_assert_eq!(scoring::vix_score(vix), MAX_SUB_SCORE);
    }

    #[test]
    fn extreme_readings_saturate(
        greed in 100.0f64..300.0,
        fear in -100.0f64..=0.0,
        overbought in 70.0f64..150.0,
        oversold in -50.0f64..=30.0,
    ) {
        prop_assert_eq!(scoring::fear_greed_score(greed), 0.0);
        prop_assert_eq!(scoring::fear_greed_score(fear), MAX_SUB_SCORE);
        prop_assert_eq!(scoring::rsi_score(overbought, overbought), 0.0);
        prop_assert_eq!(scoring::rsi_score(oversold, oversold), MAX_SUB_SCORE);
    }

    #[test]
    fn put_call_saturates(low in 0.0f64..=0.6, high in 1.1f64..10.0) {
        prop_assert_eq!(scoring::put_call_score(low), 0.0);
        prop_assert_eq!(scoring::put_call_score(high), MAX_SUB_SCORE);
    }
}

// ── Classification partition ─────────────────────────────────────────────

proptest! {
    #[test]
    fn every_total_maps_to_exactly_one_tier(total in -1000.0f64..1000.0) {
        let status = Status::classify(total);
        let matching: Vec<&Status> = Status::ALL
            .iter()
            .filter(|s| {
                let above_min = s.min_score().map_or(true, |min| total >= min);
                let below_next = match s.tier() {
                    1 => true,
                    t => Status::ALL[(t - 2) as usize]
                        .min_score()
                        .map_or(true, |next| total < next),
                };
                above_min && below_next
            })
            .collect();
        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(*matching[0], status);
    }
}
