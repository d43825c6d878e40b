//! Command implementations, independent of output formatting

use anyhow::{Context, Result};
use path402_economics::{
    EconomicsAnalysis, EconomicsEstimator, PriceCalculator, PricePoint, PricingModel,
    RevenueCalculator, RevenueSplit,
};
use path402_wallet::{
    BudgetDecision, Catalog, ContentOffer, LedgerError, PortfolioSummary, ServableEntry,
    ServingLedger, SharedLedger,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub address: String,
    pub model: PricingModel,
    pub current_supply: u64,
    pub price: u64,
    pub issuer_share: f64,
    pub split: RevenueSplit,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub decisions: Vec<BudgetDecision>,
    pub portfolio: PortfolioSummary,
    pub servable: Vec<ServableEntry>,
}

pub fn find_offer<'a>(catalog: &'a Catalog, address: &str) -> Result<&'a ContentOffer> {
    catalog
        .find(address)
        .with_context(|| format!("{} is not in the catalog", address))
}

pub fn price(offer: &ContentOffer) -> PriceReport {
    let price = offer.current_price();

    PriceReport {
        address: offer.address.clone(),
        model: offer.pricing.model.clone(),
        current_supply: offer.current_supply,
        price,
        issuer_share: RevenueCalculator::issuer_share(&offer.revenue, offer.current_supply),
        split: RevenueCalculator::split(&offer.revenue, price, offer.current_supply),
    }
}

pub fn schedule(offer: &ContentOffer, points: &[u64]) -> Vec<PricePoint> {
    EconomicsEstimator::generate_price_schedule(&offer.pricing, points)
}

pub fn economics(
    catalog: &Catalog,
    offer: &ContentOffer,
    projected_supply: Option<u64>,
    serving_participation: Option<f64>,
) -> EconomicsAnalysis {
    EconomicsEstimator::analyze(
        &offer.pricing,
        &offer.revenue,
        offer.current_supply,
        projected_supply.unwrap_or(catalog.agent.projected_supply),
        serving_participation.unwrap_or(catalog.agent.serving_participation),
    )
}

pub fn evaluate(
    catalog: &Catalog,
    offer: &ContentOffer,
    max_price: Option<u64>,
) -> BudgetDecision {
    let ledger = ServingLedger::from_config(&catalog.agent);
    ledger.evaluate_budget(
        offer,
        Some(max_price.unwrap_or(catalog.agent.max_price_per_item)),
    )
}

/// Serving income from the sale at `supply`, split across active servers
fn serve_revenue(offer: &ContentOffer, supply: u64, serving_participation: f64) -> u64 {
    let price = PriceCalculator::price(&offer.pricing, supply);
    let split = RevenueCalculator::split(&offer.revenue, price, supply);
    let servers = ((serving_participation * supply as f64).round() as u64).max(1);

    split.node_pool / servers
}

/// One agent session over the whole catalog.
///
/// Offers are evaluated in catalog order; every `acquire` is paid (simulated)
/// and recorded. Each held token then serves `serves` future buyers.
pub fn simulate(catalog: &Catalog, serves: u64) -> Result<SimulationReport> {
    let ledger = SharedLedger::new(ServingLedger::from_config(&catalog.agent));
    let max_price = Some(catalog.agent.max_price_per_item);
    let mut decisions = Vec::with_capacity(catalog.content.len());

    for offer in &catalog.content {
        let mut approved = None;
        let outcome = ledger.acquire_with(offer, max_price, |decision| {
            log::info!(
                "Simulated payment of {} to {} for {}",
                decision.current_price,
                if offer.issuer.is_empty() { "issuer" } else { offer.issuer.as_str() },
                offer.address
            );
            approved = Some(decision.clone());
            Ok(())
        });

        match outcome {
            Ok(_) => decisions.extend(approved),
            Err(LedgerError::NotApproved(decision)) => decisions.push(*decision),
            Err(e) => return Err(e).context(format!("acquiring {}", offer.address)),
        }
    }

    let participation = catalog.agent.serving_participation;
    for offer in &catalog.content {
        if !ledger.has_token(&offer.address) {
            continue;
        }

        for i in 1..=serves {
            let supply = offer.current_supply.saturating_add(i);
            let revenue = serve_revenue(offer, supply, participation);
            ledger
                .serve(&offer.address, revenue, Some(format!("buyer-{}", supply)))
                .with_context(|| format!("serving {}", offer.address))?;
        }
    }

    Ok(ledger.with(|l| SimulationReport {
        decisions,
        portfolio: l.portfolio_summary(),
        servable: l.servable_summary(),
    }))
}
