//! Forward simulation of serving income
//!
//! Every estimate walks the supply positions one buyer at a time and
//! re-evaluates the pricing and revenue rules at each step. The model set is
//! open-ended and some curves (`linear_floor`) have kinks, so no closed form
//! is assumed anywhere in this module.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_BREAKEVEN_BUYERS;
use crate::pricing::{PriceCalculator, PricingRules};
use crate::revenue::{RevenueCalculator, RevenueRules};

/// Breakeven search result.
///
/// `(-1, -1)` means breakeven was not reached within `MAX_BREAKEVEN_BUYERS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakeven {
    pub buyers_needed: i64,
    pub supply_at_breakeven: i64,
}

impl Breakeven {
    pub const NOT_REACHED: Breakeven = Breakeven {
        buyers_needed: -1,
        supply_at_breakeven: -1,
    };

    pub fn is_reached(&self) -> bool {
        self.buyers_needed >= 0
    }

    pub fn probability(&self) -> BreakevenProbability {
        match self.buyers_needed {
            n if n < 0 => BreakevenProbability::Unreachable,
            n if n < 50 => BreakevenProbability::High,
            n if n < 200 => BreakevenProbability::Medium,
            _ => BreakevenProbability::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakevenProbability {
    High,
    Medium,
    Low,
    Unreachable,
}

/// Revenue over a supply range, rounded once after summation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub gross_revenue: u64,
    pub issuer_revenue: u64,
    pub network_revenue: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub supply: u64,
    pub price: u64,
}

/// ROI percentages at a few reference supply levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiProjection {
    pub at_projected_supply: i64,
    pub at_2x_supply: i64,
    pub at_10x_supply: i64,
}

/// Full economics picture for the next buyer of one content address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicsAnalysis {
    pub current_supply: u64,
    pub current_price: u64,
    pub projected_supply: u64,
    pub buyer_position: u64,
    pub breakeven: Breakeven,
    pub probability: BreakevenProbability,
    pub roi: RoiProjection,
    pub revenue_projection: RevenueSummary,
    /// Estimated per-holder share of the network revenue
    pub your_share: u64,
    pub explanation: String,
}

pub struct EconomicsEstimator;

impl EconomicsEstimator {
    /// Ratio as whole percent, halves rounded toward positive infinity
    /// (`-0.125` is `-12`, `0.125` is `13`).
    pub fn roi_percent(ratio: f64) -> i64 {
        (ratio * 100.0 + 0.5).floor() as i64
    }

    /// Expected serving income one active server collects from the sale at `supply`
    fn serving_income_at(
        pricing: &PricingRules,
        revenue: &RevenueRules,
        supply: u64,
        serving_participation: f64,
    ) -> f64 {
        let price = PriceCalculator::price(pricing, supply) as f64;
        let issuer_share = RevenueCalculator::issuer_share(revenue, supply);
        let node_pool = price * (1.0 - issuer_share);
        let active_servers = (serving_participation * supply as f64).round().max(1.0);

        node_pool / active_servers
    }

    /// Return on the price paid at `position` if supply grows to
    /// `estimated_total_supply`.
    ///
    /// `-1.0` is a total loss (no future buyers). A free position returns `0.0`.
    pub fn estimate_roi(
        pricing: &PricingRules,
        revenue: &RevenueRules,
        position: u64,
        estimated_total_supply: u64,
        serving_participation: f64,
    ) -> f64 {
        let paid = PriceCalculator::price(pricing, position);
        if paid == 0 {
            return 0.0;
        }

        let total_serving_revenue: f64 = (position.saturating_add(1)..=estimated_total_supply)
            .map(|k| Self::serving_income_at(pricing, revenue, k, serving_participation))
            .sum();

        let paid = paid as f64;
        let roi = (total_serving_revenue - paid) / paid;

        log::debug!(
            "ROI at position {} to supply {}: paid {}, earned {:.2}, roi {:.4}",
            position,
            estimated_total_supply,
            paid,
            total_serving_revenue,
            roi
        );

        roi
    }

    /// First future position at which accumulated serving income covers the
    /// price paid at `position`.
    pub fn calculate_breakeven(
        pricing: &PricingRules,
        revenue: &RevenueRules,
        position: u64,
        serving_participation: f64,
    ) -> Breakeven {
        let paid = PriceCalculator::price(pricing, position);
        if paid == 0 {
            return Breakeven {
                buyers_needed: 0,
                supply_at_breakeven: position as i64,
            };
        }

        let paid = paid as f64;
        let mut accumulated = 0.0;

        for buyers in 1..=MAX_BREAKEVEN_BUYERS {
            let k = position.saturating_add(buyers);
            accumulated += Self::serving_income_at(pricing, revenue, k, serving_participation);

            if accumulated >= paid {
                return Breakeven {
                    buyers_needed: buyers as i64,
                    supply_at_breakeven: k as i64,
                };
            }
        }

        log::debug!(
            "No breakeven for position {} within {} buyers",
            position,
            MAX_BREAKEVEN_BUYERS
        );
        Breakeven::NOT_REACHED
    }

    /// Gross, issuer and network revenue over `from_supply..=to_supply`.
    ///
    /// Issuer revenue is rounded once after summation; network revenue is the
    /// remainder so the three figures always reconcile.
    pub fn calculate_total_revenue(
        pricing: &PricingRules,
        revenue: &RevenueRules,
        from_supply: u64,
        to_supply: u64,
    ) -> RevenueSummary {
        if from_supply > to_supply {
            return RevenueSummary::default();
        }

        let mut gross: u64 = 0;
        let mut issuer = 0.0_f64;

        for k in from_supply..=to_supply {
            let price = PriceCalculator::price(pricing, k);
            let share = RevenueCalculator::issuer_share(revenue, k);
            gross = gross.saturating_add(price);
            issuer += price as f64 * share;
        }

        let issuer_revenue = (issuer.round().max(0.0) as u64).min(gross);

        RevenueSummary {
            gross_revenue: gross,
            issuer_revenue,
            network_revenue: gross - issuer_revenue,
        }
    }

    pub fn generate_price_schedule(rules: &PricingRules, points: &[u64]) -> Vec<PricePoint> {
        points
            .iter()
            .map(|&supply| PricePoint {
                supply,
                price: PriceCalculator::price(rules, supply),
            })
            .collect()
    }

    /// Breakeven, ROI projections and revenue outlook for the buyer arriving
    /// after `current_supply` units have sold.
    pub fn analyze(
        pricing: &PricingRules,
        revenue: &RevenueRules,
        current_supply: u64,
        projected_supply: u64,
        serving_participation: f64,
    ) -> EconomicsAnalysis {
        let buyer_position = current_supply.saturating_add(1);
        let current_price = PriceCalculator::price(pricing, current_supply);

        let breakeven =
            Self::calculate_breakeven(pricing, revenue, buyer_position, serving_participation);

        let roi_percent = |total: u64| -> i64 {
            let roi = Self::estimate_roi(
                pricing,
                revenue,
                buyer_position,
                total,
                serving_participation,
            );
            Self::roi_percent(roi)
        };

        let roi = RoiProjection {
            at_projected_supply: roi_percent(projected_supply),
            at_2x_supply: roi_percent(current_supply.saturating_mul(2)),
            at_10x_supply: roi_percent(current_supply.saturating_mul(10)),
        };

        let revenue_projection =
            Self::calculate_total_revenue(pricing, revenue, buyer_position, projected_supply);

        let average_holders = (buyer_position as f64 + projected_supply as f64) / 2.0;
        let your_share =
            (revenue_projection.network_revenue as f64 / average_holders).round() as u64;

        EconomicsAnalysis {
            current_supply,
            current_price,
            projected_supply,
            buyer_position,
            breakeven,
            probability: breakeven.probability(),
            roi,
            revenue_projection,
            your_share,
            explanation: Self::explain_economics(
                pricing,
                revenue,
                buyer_position,
                projected_supply,
            ),
        }
    }

    /// Plain-text walkthrough of the curve between `position` and `projected_supply`
    pub fn explain_economics(
        pricing: &PricingRules,
        revenue: &RevenueRules,
        position: u64,
        projected_supply: u64,
    ) -> String {
        let entry_price = PriceCalculator::price(pricing, position);
        let later_price = PriceCalculator::price(pricing, projected_supply);
        let entry_share = RevenueCalculator::issuer_share(revenue, position);
        let later_share = RevenueCalculator::issuer_share(revenue, projected_supply);

        let mut lines = vec![format!(
            "Pricing model {} (base {}): position {} pays {}, position {} pays {}.",
            pricing.model, pricing.base_price, position, entry_price, projected_supply, later_price
        )];

        lines.push(format!(
            "Revenue model {}: issuer keeps {:.1}% at position {} and {:.1}% at position {}; \
             the rest is shared by active servers.",
            revenue.model,
            entry_share * 100.0,
            position,
            later_share * 100.0,
            projected_supply
        ));

        if later_price < entry_price {
            lines.push(
                "Price decays with supply, so early holders pay more but collect from every later sale."
                    .to_string(),
            );
        } else {
            lines.push(
                "Price does not decay, so every holder pays the same and returns depend only on volume."
                    .to_string(),
            );
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqrt_rules() -> (PricingRules, RevenueRules) {
        (
            PricingRules::sqrt_decay(1000, Some(1)),
            RevenueRules::fixed_issuer(0.5),
        )
    }

    #[test]
    fn test_roi_without_future_buyers_is_total_loss() {
        let (pricing, revenue) = sqrt_rules();
        let roi = EconomicsEstimator::estimate_roi(&pricing, &revenue, 50, 50, 0.5);
        assert_eq!(roi, -1.0);
    }

    #[test]
    fn test_roi_free_position_is_zero() {
        let pricing = PricingRules::fixed(0);
        let revenue = RevenueRules::fixed_issuer(0.5);
        assert_eq!(EconomicsEstimator::estimate_roi(&pricing, &revenue, 3, 100, 0.5), 0.0);
    }

    #[test]
    fn test_roi_single_future_buyer() {
        // Fixed 100, issuer 50%, next buyer at k = 2 with 1 active server:
        // node pool 50 / 1 server = 50 earned on 100 paid
        let pricing = PricingRules::fixed(100);
        let revenue = RevenueRules::fixed_issuer(0.5);
        let roi = EconomicsEstimator::estimate_roi(&pricing, &revenue, 1, 2, 0.5);
        assert!((roi - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_roi_grows_with_projected_supply() {
        let (pricing, revenue) = sqrt_rules();
        let low = EconomicsEstimator::estimate_roi(&pricing, &revenue, 10, 100, 0.5);
        let high = EconomicsEstimator::estimate_roi(&pricing, &revenue, 10, 10_000, 0.5);
        assert!(high > low);
    }

    #[test]
    fn test_breakeven_not_reached_with_empty_node_pool() {
        let pricing = PricingRules::fixed(100);
        let revenue = RevenueRules::fixed_issuer(1.0);
        let breakeven = EconomicsEstimator::calculate_breakeven(&pricing, &revenue, 1, 0.5);

        assert_eq!(breakeven, Breakeven::NOT_REACHED);
        assert!(!breakeven.is_reached());
        assert_eq!(breakeven.probability(), BreakevenProbability::Unreachable);
    }

    #[test]
    fn test_breakeven_fixed_price_single_server() {
        // Participation so low that one server collects the whole pool:
        // 50 per buyer against 100 paid
        let pricing = PricingRules::fixed(100);
        let revenue = RevenueRules::fixed_issuer(0.5);
        let breakeven = EconomicsEstimator::calculate_breakeven(&pricing, &revenue, 1, 0.0);

        assert_eq!(breakeven.buyers_needed, 2);
        assert_eq!(breakeven.supply_at_breakeven, 3);
        assert_eq!(breakeven.probability(), BreakevenProbability::High);
    }

    #[test]
    fn test_total_revenue_inclusive_range() {
        let pricing = PricingRules::fixed(100);
        let revenue = RevenueRules::fixed_issuer(0.25);
        let summary = EconomicsEstimator::calculate_total_revenue(&pricing, &revenue, 1, 10);

        assert_eq!(summary.gross_revenue, 1000);
        assert_eq!(summary.issuer_revenue, 250);
        assert_eq!(summary.network_revenue, 750);
    }

    #[test]
    fn test_total_revenue_rounds_once() {
        // 3 sales of 1 at one-third issuer share: per-sale rounding would give 0
        let pricing = PricingRules::fixed(1);
        let revenue = RevenueRules::fixed_issuer(1.0 / 3.0);
        let summary = EconomicsEstimator::calculate_total_revenue(&pricing, &revenue, 1, 3);

        assert_eq!(summary.gross_revenue, 3);
        assert_eq!(summary.issuer_revenue, 1);
        assert_eq!(summary.network_revenue, 2);
    }

    #[test]
    fn test_total_revenue_empty_range() {
        let (pricing, revenue) = sqrt_rules();
        let summary = EconomicsEstimator::calculate_total_revenue(&pricing, &revenue, 10, 9);
        assert_eq!(summary, RevenueSummary::default());
    }

    #[test]
    fn test_price_schedule() {
        let (pricing, _) = sqrt_rules();
        let schedule = EconomicsEstimator::generate_price_schedule(&pricing, &[1, 100, 10_000]);

        assert_eq!(
            schedule,
            vec![
                PricePoint { supply: 1, price: 1000 },
                PricePoint { supply: 100, price: 100 },
                PricePoint { supply: 10_000, price: 10 },
            ]
        );
    }

    #[test]
    fn test_breakeven_probability_bands() {
        let at = |n| Breakeven {
            buyers_needed: n,
            supply_at_breakeven: n + 1,
        };
        assert_eq!(at(0).probability(), BreakevenProbability::High);
        assert_eq!(at(49).probability(), BreakevenProbability::High);
        assert_eq!(at(50).probability(), BreakevenProbability::Medium);
        assert_eq!(at(199).probability(), BreakevenProbability::Medium);
        assert_eq!(at(200).probability(), BreakevenProbability::Low);
    }

    #[test]
    fn test_roi_percent_rounds_halves_up() {
        assert_eq!(EconomicsEstimator::roi_percent(-0.125), -12);
        assert_eq!(EconomicsEstimator::roi_percent(0.125), 13);
        assert_eq!(EconomicsEstimator::roi_percent(-1.0), -100);
        assert_eq!(EconomicsEstimator::roi_percent(0.354), 35);
    }

    #[test]
    fn test_analyze_at_supply_ceiling() {
        let (pricing, revenue) = sqrt_rules();
        let analysis = EconomicsEstimator::analyze(&pricing, &revenue, u64::MAX, u64::MAX, 0.5);

        assert_eq!(analysis.buyer_position, u64::MAX);
        assert_eq!(analysis.current_price, 1);
    }
}
