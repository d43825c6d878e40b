//! Plain-text rendering of command results

use owo_colors::OwoColorize;
use path402_economics::{EconomicsAnalysis, PricePoint};
use path402_wallet::{BudgetDecision, ContentOffer, Recommendation};

use crate::commands::{PriceReport, SimulationReport};

fn rule() {
    println!("{}", "═══════════════════════════════════".bright_black());
}

fn signed_percent(value: i64) -> String {
    if value >= 0 {
        format!("+{}%", value)
    } else {
        format!("{}%", value)
    }
}

pub fn price(report: &PriceReport) {
    println!("\n💰 {}", report.address.bold());
    rule();
    println!("Model:           {}", report.model);
    println!("Current Supply:  {}", report.current_supply);
    println!("Price:           {} SAT", report.price.to_string().green());
    println!("Issuer Share:    {:.1}%", report.issuer_share * 100.0);
    println!("Issuer Takes:    {} SAT", report.split.issuer);
    println!("Node Pool:       {} SAT", report.split.node_pool);
    println!();
}

pub fn schedule(offer: &ContentOffer, points: &[PricePoint]) {
    println!("\n📈 Price Schedule: {}", offer.address.bold());
    println!(
        "Model: {} (base: {} SAT), current supply {}",
        offer.pricing.model, offer.pricing.base_price, offer.current_supply
    );
    rule();
    println!("{:>10}  {:>12}", "Supply", "Price (SAT)");
    for point in points {
        let marker = if point.supply == offer.current_supply {
            " ← current"
        } else {
            ""
        };
        println!("{:>10}  {:>12}{}", point.supply, point.price, marker.cyan());
    }
    println!();
}

pub fn economics(offer: &ContentOffer, analysis: &EconomicsAnalysis) {
    println!("\n📊 Economics: {}", offer.address.bold());
    rule();
    println!("Supply:              {} issued", analysis.current_supply);
    println!("Your Position:       #{}", analysis.buyer_position);
    println!("Price to Acquire:    {} SAT", analysis.current_price);

    println!("\n{}", "Breakeven".yellow().bold());
    if analysis.breakeven.is_reached() {
        println!("  Buyers needed:     {}", analysis.breakeven.buyers_needed);
        println!("  Supply at breakeven: {}", analysis.breakeven.supply_at_breakeven);
        println!("  Probability:       {:?}", analysis.probability);
    } else {
        println!("  {}", "Not achievable within 100k buyers".red());
    }

    println!("\n{}", "ROI Projections".yellow().bold());
    println!(
        "  {:>8} (2x)         {}",
        analysis.current_supply.saturating_mul(2),
        signed_percent(analysis.roi.at_2x_supply)
    );
    println!(
        "  {:>8} (10x)        {}",
        analysis.current_supply.saturating_mul(10),
        signed_percent(analysis.roi.at_10x_supply)
    );
    println!(
        "  {:>8} (projected)  {}",
        analysis.projected_supply,
        signed_percent(analysis.roi.at_projected_supply)
    );

    let projection = &analysis.revenue_projection;
    println!(
        "\n{} (to supply {})",
        "Revenue Projection".yellow().bold(),
        analysis.projected_supply
    );
    println!("  Gross:    {} SAT", projection.gross_revenue);
    println!("  Issuer:   {} SAT", projection.issuer_revenue);
    println!("  Network:  {} SAT", projection.network_revenue);
    println!("  Your est. share: ~{} SAT", analysis.your_share);

    println!("\n{}", analysis.explanation.bright_black());
    println!();
}

pub fn decision(decision: &BudgetDecision) {
    let headline = match decision.recommendation {
        Recommendation::Acquire => format!("✅ {}", decision.recommendation.as_str().to_uppercase()),
        Recommendation::Skip => format!("⏭️  {}", decision.recommendation.as_str().to_uppercase()),
        Recommendation::InsufficientFunds => {
            format!("❌ {}", decision.recommendation.as_str().to_uppercase())
        }
    };

    println!("\n{} {}", headline.bold(), decision.address);
    println!("  Current Price:     {} SAT", decision.current_price);
    println!("  Reasoning:         {}", decision.reasoning);
    println!("  Budget Remaining:  {} SAT", decision.budget_remaining);
    if let Some(roi) = decision.expected_roi_percent() {
        println!("  Expected ROI:      {}", signed_percent(roi));
    }
}

pub fn simulation(report: &SimulationReport) {
    println!("\n🤖 Agent Session");
    rule();
    for d in &report.decisions {
        decision(d);
    }

    let portfolio = &report.portfolio;
    println!("\n{}", "Wallet".yellow().bold());
    println!("  Balance:       {} SAT", portfolio.balance);
    println!("  Tokens Held:   {}", portfolio.total_tokens);
    println!("  Total Spent:   {} SAT", portfolio.total_spent);
    println!("  Total Earned:  {} SAT", portfolio.total_earned);
    let net = if portfolio.net_position >= 0 {
        format!("+{} SAT", portfolio.net_position).green().to_string()
    } else {
        format!("{} SAT", portfolio.net_position).red().to_string()
    };
    println!("  Net Position:  {}", net);

    if report.servable.is_empty() {
        println!("\n  No servable tokens.");
    } else {
        println!("\n{}", "Servable Content".yellow().bold());
        for entry in &report.servable {
            println!(
                "  {}  #{}  paid {} SAT  {} serves  {} SAT  {}",
                entry.address,
                entry.position,
                entry.price_paid,
                entry.serves,
                entry.revenue_earned,
                signed_percent(entry.roi_percent)
            );
        }
    }
    println!();
}
