use path402_economics::*;
use proptest::prelude::*;

#[test]
fn test_sqrt_decay_reference_points() {
    let rules = PricingRules::sqrt_decay(1000, Some(1));

    // Whitepaper examples: 1000 / sqrt(100) and 1000 / sqrt(10_000)
    assert_eq!(PriceCalculator::price(&rules, 100), 100);
    assert_eq!(PriceCalculator::price(&rules, 10_000), 10);
}

#[test]
fn test_equal_split_reference_points() {
    let rules = RevenueRules::equal_split();

    assert_eq!(RevenueCalculator::issuer_share(&rules, 0), 1.0);
    assert!((RevenueCalculator::issuer_share(&rules, 9) - 0.1).abs() < 1e-12);
}

#[test]
fn test_rules_from_json_config() {
    let pricing: PricingRules =
        serde_json::from_str(r#"{"model":"linear_floor","base_price":800,"decay_rate":4.0}"#)
            .unwrap();
    assert_eq!(pricing.model, PricingModel::LinearFloor);
    assert_eq!(pricing.floor, None);
    assert_eq!(PriceCalculator::price(&pricing, 100), 400);

    let revenue: RevenueRules =
        serde_json::from_str(r#"{"model":"decaying_issuer","issuer_share":0.6}"#).unwrap();
    assert_eq!(revenue.model, RevenueModel::DecayingIssuer);
}

#[test]
fn test_unknown_tags_degrade_to_defaults() {
    let pricing: PricingRules =
        serde_json::from_str(r#"{"model":"dutch_auction","base_price":250}"#).unwrap();
    assert_eq!(
        pricing.model,
        PricingModel::Unrecognized("dutch_auction".to_string())
    );
    assert_eq!(PriceCalculator::price(&pricing, 1), 250);
    assert_eq!(PriceCalculator::price(&pricing, 9_999), 250);

    // The raw tag survives re-serialization
    let json = serde_json::to_value(&pricing).unwrap();
    assert_eq!(json["model"], "dutch_auction");

    let revenue: RevenueRules =
        serde_json::from_str(r#"{"model":"quadratic","issuer_share":0.2}"#).unwrap();
    assert_eq!(revenue.model, RevenueModel::Unrecognized("quadratic".to_string()));
    assert_eq!(serde_json::to_value(&revenue).unwrap()["model"], "quadratic");
    assert_eq!(RevenueCalculator::issuer_share(&revenue, 500), 0.2);
}

#[test]
fn test_roi_at_current_supply_is_total_loss() {
    let pricing = PricingRules::log_decay(2000, Some(5));
    let revenue = RevenueRules::decaying_issuer(0.5, None, None);

    let roi = EconomicsEstimator::estimate_roi(&pricing, &revenue, 250, 250, 0.3);
    assert_eq!(roi, -1.0);
}

#[test]
fn test_breakeven_sentinel_when_issuer_takes_everything() {
    for pricing in [
        PricingRules::fixed(1000),
        PricingRules::sqrt_decay(1000, None),
        PricingRules::linear_floor(1000, None, None),
    ] {
        let revenue = RevenueRules::fixed_issuer(1.0);
        let breakeven = EconomicsEstimator::calculate_breakeven(&pricing, &revenue, 10, 0.5);
        assert_eq!(breakeven.buyers_needed, -1);
        assert_eq!(breakeven.supply_at_breakeven, -1);
    }
}

#[test]
fn test_breakeven_matches_roi_crossing() {
    let pricing = PricingRules::sqrt_decay(1000, Some(1));
    let revenue = RevenueRules::fixed_issuer(0.5);
    let position = 5;

    let breakeven = EconomicsEstimator::calculate_breakeven(&pricing, &revenue, position, 0.1);
    assert!(breakeven.is_reached());

    let at = breakeven.supply_at_breakeven as u64;
    let roi_at = EconomicsEstimator::estimate_roi(&pricing, &revenue, position, at, 0.1);
    let roi_before = EconomicsEstimator::estimate_roi(&pricing, &revenue, position, at - 1, 0.1);

    assert!(roi_at >= 0.0, "roi at breakeven was {}", roi_at);
    assert!(roi_before < 0.0, "roi before breakeven was {}", roi_before);
    assert_eq!(breakeven.buyers_needed as u64, at - position);
}

#[test]
fn test_revenue_summary_reconciles() {
    let pricing = PricingRules::sqrt_decay(1000, Some(1));
    let revenue = RevenueRules::decaying_issuer(0.5, None, None);

    let summary = EconomicsEstimator::calculate_total_revenue(&pricing, &revenue, 1, 500);
    let gross: u64 = PriceCalculator::prices(&pricing, 1, 500).iter().sum();

    assert_eq!(summary.gross_revenue, gross);
    assert_eq!(summary.issuer_revenue + summary.network_revenue, gross);
    assert!(summary.issuer_revenue < summary.network_revenue);
}

#[test]
fn test_analysis_for_next_buyer() {
    let pricing = PricingRules::sqrt_decay(1000, Some(1));
    let revenue = RevenueRules::fixed_issuer(0.5);

    let analysis = EconomicsEstimator::analyze(&pricing, &revenue, 99, 1000, 0.5);

    assert_eq!(analysis.buyer_position, 100);
    assert_eq!(analysis.current_price, PriceCalculator::price(&pricing, 99));
    assert_eq!(analysis.probability, analysis.breakeven.probability());
    assert!(analysis.roi.at_10x_supply > analysis.roi.at_2x_supply);
    assert_eq!(
        analysis.revenue_projection,
        EconomicsEstimator::calculate_total_revenue(&pricing, &revenue, 100, 1000)
    );
    assert!(analysis.explanation.contains("sqrt_decay"));
}

#[test]
fn test_default_schedule_is_non_increasing_for_decay() {
    let rules = PricingRules::sqrt_decay(5000, Some(1));
    let schedule =
        EconomicsEstimator::generate_price_schedule(&rules, &constants::DEFAULT_SCHEDULE_POINTS);

    assert_eq!(schedule.len(), constants::DEFAULT_SCHEDULE_POINTS.len());
    for pair in schedule.windows(2) {
        assert!(pair[1].price <= pair[0].price);
    }
}

fn any_pricing_rules() -> impl Strategy<Value = PricingRules> {
    (
        prop_oneof![
            Just(PricingModel::Fixed),
            Just(PricingModel::SqrtDecay),
            Just(PricingModel::LogDecay),
            Just(PricingModel::LinearFloor),
            Just(PricingModel::Unrecognized("dutch_auction".to_string())),
        ],
        1u64..1_000_000,
        proptest::option::of(0u64..10_000),
        proptest::option::of(0.0f64..1_000.0),
    )
        .prop_map(|(model, base_price, floor, decay_rate)| PricingRules {
            model,
            base_price,
            floor,
            decay_rate,
        })
}

proptest! {
    #[test]
    fn decaying_curves_never_increase(
        base_price in 1u64..10_000_000,
        floor in proptest::option::of(0u64..1_000),
        log in proptest::bool::ANY,
        n1 in 1u64..1_000_000,
        step in 1u64..1_000_000,
    ) {
        let rules = if log {
            PricingRules::log_decay(base_price, floor)
        } else {
            PricingRules::sqrt_decay(base_price, floor)
        };
        let n2 = n1 + step;
        prop_assert!(PriceCalculator::price(&rules, n2) <= PriceCalculator::price(&rules, n1));
    }

    #[test]
    fn price_is_never_free(rules in any_pricing_rules(), n in 0u64..10_000_000) {
        prop_assert!(PriceCalculator::price(&rules, n) >= 1);
    }

    #[test]
    fn fixed_price_is_constant(base_price in 1u64..u64::MAX / 2, n in 1u64..u64::MAX) {
        let rules = PricingRules::fixed(base_price);
        prop_assert_eq!(PriceCalculator::price(&rules, n), base_price);
    }

    #[test]
    fn equal_split_is_reciprocal(n in 0u64..1_000_000) {
        let rules = RevenueRules::equal_split();
        let share = RevenueCalculator::issuer_share(&rules, n);
        prop_assert!((share - 1.0 / (n as f64 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn split_always_conserves_price(
        price in 0u64..1_000_000_000,
        share in 0.0f64..=1.0,
        n in 0u64..10_000,
    ) {
        let rules = RevenueRules::fixed_issuer(share);
        let split = RevenueCalculator::split(&rules, price, n);
        prop_assert_eq!(split.issuer + split.node_pool, price);
    }
}
