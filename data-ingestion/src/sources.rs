//! The source table: where each live field comes from, how to scale it, and
//! what to use when the feed has nothing.

use common::{Decimal, LiveValues};
use rust_decimal_macros::dec;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Yahoo,
    Fred,
    CoinGecko,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveField {
    FedBalance,
    Tga,
    Rrp,
    BankReserves,
    Vix,
    Dxy,
    Wti,
    UsdJpy,
    Us10y,
    Gold,
    BtcPrice,
}

impl LiveField {
    /// Field name as it appears in the snapshot JSON
    pub fn name(&self) -> &'static str {
        match self {
            LiveField::FedBalance => "fedBalance",
            LiveField::Tga => "tga",
            LiveField::Rrp => "rrp",
            LiveField::BankReserves => "bankReserves",
            LiveField::Vix => "vix",
            LiveField::Dxy => "dxy",
            LiveField::Wti => "wti",
            LiveField::UsdJpy => "usdjpy",
            LiveField::Us10y => "us10y",
            LiveField::Gold => "gold",
            LiveField::BtcPrice => "btcPrice",
        }
    }

    fn slot<'a>(&self, values: &'a mut LiveValues) -> &'a mut Decimal {
        match self {
            LiveField::FedBalance => &mut values.fed_balance,
            LiveField::Tga => &mut values.tga,
            LiveField::Rrp => &mut values.rrp,
            LiveField::BankReserves => &mut values.bank_reserves,
            LiveField::Vix => &mut values.vix,
            LiveField::Dxy => &mut values.dxy,
            LiveField::Wti => &mut values.wti,
            LiveField::UsdJpy => &mut values.usdjpy,
            LiveField::Us10y => &mut values.us10y,
            LiveField::Gold => &mut values.gold,
            LiveField::BtcPrice => &mut values.btc_price,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SourceSpec {
    pub field: LiveField,
    pub feed: Feed,
    /// Symbol, series id or coin id within the feed
    pub key: &'static str,
    /// Raw feed value divided by this gives the snapshot unit
    pub divisor: Decimal,
    pub fallback: Decimal,
}

const fn spec(field: LiveField, feed: Feed, key: &'static str, divisor: Decimal, fallback: Decimal) -> SourceSpec {
    SourceSpec {
        field,
        feed,
        key,
        divisor,
        fallback,
    }
}

// WALCL and WDTGAL are published in millions, RRPONTSYD and WRESBAL in billions
pub const SOURCE_TABLE: [SourceSpec; 11] = [
    spec(LiveField::FedBalance, Feed::Fred, "WALCL", dec!(1000000), dec!(6.58)),
    spec(LiveField::Tga, Feed::Fred, "WDTGAL", dec!(1000000), dec!(0.968)),
    spec(LiveField::Rrp, Feed::Fred, "RRPONTSYD", dec!(1000), dec!(0.006)),
    spec(LiveField::BankReserves, Feed::Fred, "WRESBAL", dec!(1000), dec!(2.99)),
    spec(LiveField::Vix, Feed::Yahoo, "^VIX", dec!(1), dec!(16.4)),
    spec(LiveField::Dxy, Feed::Yahoo, "DX-Y.NYB", dec!(1), dec!(99.25)),
    spec(LiveField::Wti, Feed::Yahoo, "CL=F", dec!(1), dec!(72.53)),
    spec(LiveField::UsdJpy, Feed::Yahoo, "JPY=X", dec!(1), dec!(155.2)),
    spec(LiveField::Us10y, Feed::Yahoo, "^TNX", dec!(1), dec!(4.54)),
    spec(LiveField::Gold, Feed::Yahoo, "GC=F", dec!(1), dec!(2800)),
    spec(LiveField::BtcPrice, Feed::CoinGecko, "bitcoin", dec!(1), dec!(95000)),
];

/// Keys to request from one feed
pub fn keys_for(feed: Feed) -> Vec<&'static str> {
    SOURCE_TABLE
        .iter()
        .filter(|s| s.feed == feed)
        .map(|s| s.key)
        .collect()
}

/// Every field at its fallback value
pub fn fallback_values() -> LiveValues {
    let mut values = LiveValues {
        fed_balance: Decimal::ZERO,
        tga: Decimal::ZERO,
        rrp: Decimal::ZERO,
        bank_reserves: Decimal::ZERO,
        vix: Decimal::ZERO,
        dxy: Decimal::ZERO,
        wti: Decimal::ZERO,
        usdjpy: Decimal::ZERO,
        us10y: Decimal::ZERO,
        gold: Decimal::ZERO,
        btc_price: Decimal::ZERO,
    };
    for spec in &SOURCE_TABLE {
        *spec.field.slot(&mut values) = spec.fallback;
    }
    values
}

/// Raw numbers returned by each feed, keyed the way the feed names them
#[derive(Debug, Clone, Default)]
pub struct FeedReadings {
    pub yahoo: HashMap<String, f64>,
    pub fred: HashMap<String, f64>,
    pub coingecko: HashMap<String, f64>,
}

impl FeedReadings {
    pub fn get(&self, feed: Feed, key: &str) -> Option<f64> {
        let readings = match feed {
            Feed::Yahoo => &self.yahoo,
            Feed::Fred => &self.fred,
            Feed::CoinGecko => &self.coingecko,
        };
        readings.get(key).copied()
    }
}

/// Convert a raw reading to snapshot units. Zero, negative and non-finite
/// readings are treated as absent.
///
/// Goes through the shortest decimal representation of the float so a quote
/// of 157.85 stays 157.85.
pub fn normalize(raw: f64, divisor: Decimal) -> Option<Decimal> {
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }
    raw.to_string().parse::<Decimal>().ok()?.checked_div(divisor)
}

/// Fill every field from the readings, falling back where needed. Returns
/// the values and the names of the fields that fell back.
pub fn resolve(readings: &FeedReadings) -> (LiveValues, Vec<String>) {
    let mut values = fallback_values();
    let mut fell_back = Vec::new();

    for spec in &SOURCE_TABLE {
        match readings
            .get(spec.feed, spec.key)
            .and_then(|raw| normalize(raw, spec.divisor))
        {
            Some(value) => *spec.field.slot(&mut values) = value,
            None => fell_back.push(spec.field.name().to_string()),
        }
    }

    (values, fell_back)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_for_feed() {
        assert_eq!(keys_for(Feed::Fred), vec!["WALCL", "WDTGAL", "RRPONTSYD", "WRESBAL"]);
        assert_eq!(keys_for(Feed::CoinGecko), vec!["bitcoin"]);
        assert_eq!(keys_for(Feed::Yahoo).len(), 6);
    }

    #[test]
    fn test_empty_readings_fall_back_everywhere() {
        let (values, fell_back) = resolve(&FeedReadings::default());
        assert_eq!(values, fallback_values());
        assert_eq!(fell_back.len(), SOURCE_TABLE.len());
        assert_eq!(values.tga, dec!(0.968));
        assert_eq!(values.btc_price, dec!(95000));
    }

    #[test]
    fn test_fred_units_are_scaled_to_trillions() {
        let mut readings = FeedReadings::default();
        readings.fred.insert("WALCL".to_string(), 6_580_000.0);
        readings.fred.insert("RRPONTSYD".to_string(), 5.0);

        let (values, fell_back) = resolve(&readings);
        assert_eq!(values.fed_balance, dec!(6.58));
        assert_eq!(values.rrp, dec!(0.005));
        assert!(!fell_back.contains(&"fedBalance".to_string()));
        assert!(fell_back.contains(&"tga".to_string()));
    }

    #[test]
    fn test_unusable_readings_are_replaced() {
        let mut readings = FeedReadings::default();
        readings.yahoo.insert("^VIX".to_string(), f64::NAN);
        readings.yahoo.insert("CL=F".to_string(), 0.0);
        readings.yahoo.insert("DX-Y.NYB".to_string(), -3.0);
        readings.yahoo.insert("JPY=X".to_string(), 157.85);

        let (values, fell_back) = resolve(&readings);
        assert_eq!(values.vix, dec!(16.4));
        assert_eq!(values.wti, dec!(72.53));
        assert_eq!(values.dxy, dec!(99.25));
        assert_eq!(values.usdjpy, dec!(157.85));
        assert!(fell_back.contains(&"vix".to_string()));
        assert!(!fell_back.contains(&"usdjpy".to_string()));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(2990.0, dec!(1000)), Some(dec!(2.99)));
        assert_eq!(normalize(f64::INFINITY, dec!(1)), None);
    }
}
