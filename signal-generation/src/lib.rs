// Signal Engine
// Turns a market snapshot into per-metric classifications, an overall
// posture and the derived liquidity quantities

pub mod aggregator;
pub mod classifier;
pub mod derived;
pub mod engine;
pub mod signals;

#[cfg(test)]
mod test_support;

pub use aggregator::{aggregate, OverallSignal, SignalCounts};
pub use classifier::{classify, classify_metric};
pub use derived::{DerivedQuantities, HEALTHY_CARRY_SPREAD};
pub use engine::{SignalEngine, SignalReport};
pub use signals::{Classifications, MetricClassification, MetricId, MetricStatus, Posture};
