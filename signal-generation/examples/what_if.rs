//! Evaluate the reference reading, then the same reading with the yen and
//! the dollar both against risk assets.

use chrono::Utc;
use common::{LiveValues, MacroIndicators, MarketSnapshot, Thresholds};
use rust_decimal_macros::dec;
use signal_generation::SignalEngine;

fn main() {
    let live = LiveValues {
        fed_balance: dec!(6.58),
        tga: dec!(0.968),
        rrp: dec!(0.006),
        bank_reserves: dec!(2.99),
        vix: dec!(16.4),
        dxy: dec!(99.25),
        wti: dec!(72.53),
        usdjpy: dec!(155.2),
        us10y: dec!(4.54),
        gold: dec!(2800),
        btc_price: dec!(95000),
    };
    let mut snapshot = MarketSnapshot::assemble(
        live,
        Vec::new(),
        &Thresholds::default(),
        &MacroIndicators::default(),
        Utc::now(),
    );

    let engine = SignalEngine::new();
    let base = engine.evaluate(&snapshot);
    println!("base: {} ({})", base.overall.posture, base.overall.recommendation);

    snapshot.usdjpy = dec!(140);
    snapshot.dxy = dec!(110);
    let stressed = engine.evaluate(&snapshot);
    println!("stressed: {} ({})", stressed.overall.posture, stressed.overall.rationale);

    for c in &stressed.classifications.checklist {
        println!("  {:<14} {}", c.metric.name(), c.status);
    }
    println!("net liquidity: {}T", stressed.derived.net_liquidity);
}
