pub mod api;
pub mod config;
pub mod refresh;
pub mod report;
pub mod state;
pub mod view;

pub use api::{router, AppState};
pub use config::{
    create_config_template, load_config, load_or_default, save_config, DashboardConfig,
    RefreshConfig, ServerConfig, DEFAULT_CONFIG_PATH,
};
pub use refresh::{LatestState, RefreshHandle, RefreshLoop};
pub use report::{log_updates, render};
pub use state::DashboardState;
pub use view::{CarryTrade, ChecklistRow, Countdown, DashboardView, Gauge, MetricCard};
