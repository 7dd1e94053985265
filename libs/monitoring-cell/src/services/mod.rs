pub mod alerts;
pub mod health;
pub mod metrics;
pub mod monitor;
pub mod sessions;
pub mod trends;

pub use alerts::AlertManagerService;
pub use health::score_health;
pub use metrics::MetricStoreService;
pub use monitor::MonitoringService;
pub use sessions::SessionTrackerService;
pub use trends::analyze_trend;
