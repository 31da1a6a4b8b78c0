use chrono::{TimeZone, Utc};
use common::{LiveValues, MacroIndicators, MarketSnapshot, Thresholds};
use rust_decimal_macros::dec;

/// Live values and thresholds of the reference reading: TGA above its stress
/// level, everything else on the bullish side.
pub fn scenario_a() -> MarketSnapshot {
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
    let thresholds = Thresholds {
        tga_stress_threshold: dec!(0.65),
        reserve_abundance_threshold: dec!(2.5),
        usjpy_danger_threshold: dec!(145),
        dxy_alert_threshold: dec!(105),
        wti_alert_threshold: dec!(80),
    };
    let last_update = Utc.with_ymd_and_hms(2026, 2, 2, 12, 0, 0).unwrap();

    MarketSnapshot::assemble(
        live,
        Vec::new(),
        &thresholds,
        &MacroIndicators::default(),
        last_update,
    )
}
