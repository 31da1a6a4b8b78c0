// Data acquisition for the liquidity monitor
// HTTP feeds, the source/fallback table and snapshot assembly

pub mod acquisition;
pub mod config;
pub mod connectors;
pub mod sources;

pub use acquisition::{FallbackSnapshotSource, LiveSnapshotSource, SnapshotSource};
pub use config::SourceConfig;
pub use connectors::ConnectorError;
pub use sources::{Feed, FeedReadings, LiveField, SourceSpec, SOURCE_TABLE};
