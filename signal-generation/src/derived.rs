use common::{Decimal, MarketSnapshot};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// US 10Y over JGB 10Y spread above which the yen carry trade pays (pp)
pub const HEALTHY_CARRY_SPREAD: Decimal = dec!(3);

/// Quantities computed from the snapshot, independent of classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedQuantities {
    /// Fed balance sheet minus TGA minus RRP (trillions USD); may be negative
    pub net_liquidity: Decimal,
    /// US 10Y minus JGB 10Y (percentage points)
    pub yield_spread: Decimal,
    pub healthy_carry_spread: bool,
}

pub fn net_liquidity(fed_balance: Decimal, tga: Decimal, rrp: Decimal) -> Decimal {
    fed_balance - tga - rrp
}

pub fn yield_spread(us10y: Decimal, jgb10y: Decimal) -> Decimal {
    us10y - jgb10y
}

impl DerivedQuantities {
    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Self {
        let spread = yield_spread(snapshot.us10y, snapshot.jgb10y);
        Self {
            net_liquidity: net_liquidity(snapshot.fed_balance, snapshot.tga, snapshot.rrp),
            yield_spread: spread,
            healthy_carry_spread: spread > HEALTHY_CARRY_SPREAD,
        }
    }
}
